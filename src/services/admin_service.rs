use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;

use crate::{
    audit,
    domain::artist_review,
    dto::{
        admin::{
            AdminArtworkList, AdminOrderList, ApproveArtistRequest, ArtistReview,
            ArtistReviewList, ArtworkStats, DashboardStats, OrderStats, RejectArtistRequest,
            UpdateArtworkStatusRequest,
        },
        orders::{OrderDetail, ShipOrderRequest},
    },
    entity::{
        Artists, Artworks, Orders, Users,
        artists::{self, ActiveModel as ArtistActive, Column as ArtistCol, Model as ArtistModel},
        artworks::{self, ActiveModel as ArtworkActive, Column as ArtworkCol},
        orders::Column as OrderCol,
        sea_orm_active_enums::{ArtistStatus, ArtworkStatus, ShippingStatus},
        users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ArtistProfile, Artwork, User},
    notifications,
    response::{ApiResponse, Meta},
    routes::params::{
        AdminArtworkQuery, AdminArtworkSort, AdminOrderQuery, AdminOrderSort, Pagination,
        filter_value,
    },
    services::{artist_service::samples_of, artwork_service::with_artists, order_service},
    state::AppState,
};

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;

    let count_status = |status: ArtistStatus| {
        Artists::find()
            .filter(ArtistCol::Status.eq(status))
            .count(&state.orm)
    };

    let data = DashboardStats {
        pending_artists: count_status(ArtistStatus::Pending).await?,
        approved_artists: count_status(ArtistStatus::Approved).await?,
        rejected_artists: count_status(ArtistStatus::Rejected).await?,
        total_users: Users::find().count(&state.orm).await?,
    };
    Ok(ApiResponse::success("Dashboard", data, None))
}

async fn review_of(state: &AppState, artist: ArtistModel) -> AppResult<ArtistReview> {
    let user = Users::find_by_id(artist.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    let samples = samples_of(state, artist.id).await?;
    Ok(ArtistReview {
        artist: ArtistProfile::from(artist),
        user: User::from(user),
        samples,
    })
}

pub async fn pending_artists(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ArtistReviewList>> {
    ensure_admin(user)?;
    let page = pagination.normalize(10, 50);

    let finder = Artists::find()
        .filter(ArtistCol::Status.eq(ArtistStatus::Pending))
        .order_by_asc(ArtistCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let artists = finder
        .limit(page.per_page as u64)
        .offset(page.offset as u64)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(artists.len());
    for artist in artists {
        items.push(review_of(state, artist).await?);
    }

    let meta = Meta::new(page.page, page.per_page, total);
    Ok(ApiResponse::success("Pending artists", ArtistReviewList { items }, Some(meta)))
}

pub async fn artist_detail(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ArtistReview>> {
    ensure_admin(user)?;
    let artist = Artists::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Artist"))?;
    let data = review_of(state, artist).await?;
    Ok(ApiResponse::success("Artist", data, None))
}

pub async fn approve_artist(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ApproveArtistRequest,
) -> AppResult<ApiResponse<ArtistProfile>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let artist = Artists::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Artist"))?;

    let approval = artist_review::approve(artist.status, payload.commission_rate, payload.featured)?;

    let mut active: ArtistActive = artist.into();
    active.status = Set(ArtistStatus::Approved);
    active.commission_rate = Set(approval.commission_rate);
    active.featured = Set(approval.featured);
    active.rejection_reason = Set(None);
    active.can_reapply_at = Set(None);
    active.approved_by = Set(Some(user.user_id));
    if let Some(notes) = payload.notes_admin {
        active.notes_admin = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().into());
    let artist = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(artist_id = %artist.id, commission_rate = artist.commission_rate, "artist approved");
    notifications::artist_approved(artist.user_id);
    audit::record(
        &state.pool,
        user.user_id,
        "artist_approve",
        "artists",
        serde_json::json!({ "artist_id": artist.id, "commission_rate": artist.commission_rate }),
    )
    .await;

    Ok(ApiResponse::success("Artist approved", ArtistProfile::from(artist), None))
}

pub async fn reject_artist(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RejectArtistRequest,
) -> AppResult<ApiResponse<ArtistProfile>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let artist = Artists::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Artist"))?;

    let now = Utc::now();
    let rejection = artist_review::reject(artist.status, payload.reason, now)?;

    let mut active: ArtistActive = artist.into();
    active.status = Set(ArtistStatus::Rejected);
    active.rejection_reason = Set(Some(rejection.reason.clone()));
    active.can_reapply_at = Set(Some(rejection.can_reapply_at.into()));
    active.featured = Set(false);
    active.approved_by = Set(Some(user.user_id));
    if let Some(notes) = payload.notes_admin {
        active.notes_admin = Set(Some(notes));
    }
    active.updated_at = Set(now.into());
    let artist = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(artist_id = %artist.id, "artist rejected");
    notifications::artist_rejected(artist.user_id, &rejection.reason);
    audit::record(
        &state.pool,
        user.user_id,
        "artist_reject",
        "artists",
        serde_json::json!({ "artist_id": artist.id, "reason": rejection.reason }),
    )
    .await;

    Ok(ApiResponse::success("Artist rejected", ArtistProfile::from(artist), None))
}

async fn artwork_stats(state: &AppState) -> AppResult<ArtworkStats> {
    let count_status = |status: ArtworkStatus| {
        Artworks::find()
            .filter(ArtworkCol::Status.eq(status))
            .count(&state.orm)
    };
    Ok(ArtworkStats {
        total: Artworks::find().count(&state.orm).await?,
        available: count_status(ArtworkStatus::Available).await?,
        sold: count_status(ArtworkStatus::Sold).await?,
        pending: count_status(ArtworkStatus::Pending).await?,
    })
}

pub async fn list_artworks(
    state: &AppState,
    user: &AuthUser,
    query: AdminArtworkQuery,
) -> AppResult<ApiResponse<AdminArtworkList>> {
    ensure_admin(user)?;
    let page = query.pagination().normalize(15, 50);

    let mut condition = Condition::all();
    if let Some(search) = filter_value(&query.search) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Artworks, ArtworkCol::Title)).ilike(pattern.clone()))
                .add(Expr::col((Artworks, ArtworkCol::Description)).ilike(pattern.clone()))
                .add(Expr::col((Users, users::Column::Name)).ilike(pattern)),
        );
    }
    if let Some(status) = query.status {
        condition = condition.add(ArtworkCol::Status.eq(status));
    }
    if let Some(category) = filter_value(&query.category) {
        condition = condition.add(ArtworkCol::Category.eq(category));
    }
    if let Some(artist_status) = query.artist_status {
        condition = condition.add(ArtistCol::Status.eq(artist_status));
    }

    let finder = Artworks::find()
        .join(JoinType::InnerJoin, artworks::Relation::Artists.def())
        .join(JoinType::InnerJoin, artists::Relation::Users.def())
        .filter(condition);
    let finder = match query.sort.unwrap_or_default() {
        AdminArtworkSort::Latest => finder.order_by_desc(ArtworkCol::CreatedAt),
        AdminArtworkSort::Oldest => finder.order_by_asc(ArtworkCol::CreatedAt),
        AdminArtworkSort::PriceHigh => finder.order_by_desc(ArtworkCol::Price),
        AdminArtworkSort::PriceLow => finder.order_by_asc(ArtworkCol::Price),
        AdminArtworkSort::MostViewed => finder.order_by_desc(ArtworkCol::Views),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let models = finder
        .limit(page.per_page as u64)
        .offset(page.offset as u64)
        .all(&state.orm)
        .await?;
    let items = with_artists(&state.orm, models).await?;

    let data = AdminArtworkList {
        items,
        stats: artwork_stats(state).await?,
    };
    let meta = Meta::new(page.page, page.per_page, total);
    Ok(ApiResponse::success("Artworks", data, Some(meta)))
}

pub async fn artwork_detail(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Artwork>> {
    ensure_admin(user)?;
    let model = Artworks::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Artwork"))?;
    let artwork = with_artists(&state.orm, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::not_found("Artwork"))?;
    Ok(ApiResponse::success("Artwork", artwork, None))
}

pub async fn update_artwork_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateArtworkStatusRequest,
) -> AppResult<ApiResponse<Artwork>> {
    ensure_admin(user)?;
    let existing = Artworks::find_by_id(id)
        .filter(ArtworkCol::Status.ne(ArtworkStatus::Deleted))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Artwork"))?;
    let previous = existing.status;

    let mut active: ArtworkActive = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let artwork = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "artwork_status_update",
        "artworks",
        serde_json::json!({ "artwork_id": artwork.id, "from": previous, "to": artwork.status }),
    )
    .await;

    Ok(ApiResponse::success("Artwork status updated", Artwork::from(artwork), None))
}

async fn order_stats(state: &AppState) -> AppResult<OrderStats> {
    let count_shipping = |status: ShippingStatus| {
        Orders::find()
            .filter(OrderCol::ShippingStatus.eq(status))
            .count(&state.orm)
    };
    Ok(OrderStats {
        total: Orders::find().count(&state.orm).await?,
        pending: count_shipping(ShippingStatus::Pending).await?,
        shipped: count_shipping(ShippingStatus::Shipped).await?,
        delivered: count_shipping(ShippingStatus::Delivered).await?,
    })
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: AdminOrderQuery,
) -> AppResult<ApiResponse<AdminOrderList>> {
    ensure_admin(user)?;
    let page = query.pagination().normalize(15, 50);

    let mut condition = Condition::all();
    if let Some(search) = filter_value(&query.search) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(OrderCol::BuyerName).ilike(pattern.clone()))
                .add(Expr::col(OrderCol::TrackingNumber).ilike(pattern)),
        );
    }
    if let Some(status) = query.payment_status {
        condition = condition.add(OrderCol::PaymentStatus.eq(status));
    }
    if let Some(status) = query.shipping_status {
        condition = condition.add(OrderCol::ShippingStatus.eq(status));
    }
    if let Some(method) = query.payment_method {
        condition = condition.add(OrderCol::PaymentMethod.eq(method));
    }

    let finder = Orders::find().filter(condition);
    let finder = match query.sort.unwrap_or_default() {
        AdminOrderSort::Latest => finder.order_by_desc(OrderCol::CreatedAt),
        AdminOrderSort::Oldest => finder.order_by_asc(OrderCol::CreatedAt),
        AdminOrderSort::AmountHigh => finder.order_by_desc(OrderCol::TotalAmount),
        AdminOrderSort::AmountLow => finder.order_by_asc(OrderCol::TotalAmount),
    };

    let (items, meta) = order_service::paged_orders(state, finder, page).await?;
    let data = AdminOrderList {
        items,
        stats: order_stats(state).await?,
    };
    Ok(ApiResponse::success("Orders", data, Some(meta)))
}

pub async fn order_detail(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    order_service::managed_order(state, user, id).await
}

pub async fn ship_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ShipOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    order_service::ship_order(state, user, id, payload).await
}

pub async fn deliver_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    order_service::deliver_order(state, user, id).await
}
