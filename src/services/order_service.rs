use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use sea_orm::sea_query::{Expr, LockType};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        commission::CommissionSplit,
        fulfillment::{can_deliver, can_ship, ensure_deliverable, ensure_purchasable, ensure_shippable},
    },
    dto::orders::{CreateOrderRequest, OrderDetail, OrderList, ShipOrderRequest},
    entity::{
        Artists, Artworks, Orders, Transactions,
        artists::Column as ArtistCol,
        artworks::{ActiveModel as ArtworkActive, Column as ArtworkCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Model as OrderModel},
        sea_orm_active_enums::{
            ArtworkStatus, PaymentStatus, ShippingStatus, TransactionStatus,
        },
        transactions::{ActiveModel as TransactionActive, Column as TransactionCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_buyer},
    models::{Artwork, Order, Transaction},
    notifications,
    response::{ApiResponse, Meta},
    routes::params::{ArtistOrderQuery, Page, Pagination},
    services::{artist_service::approved_artist, artwork_service::with_artists},
    state::AppState,
};

/// Simulated gateway reference: `PAY_<10 uppercase alphanumerics>_<unix seconds>`.
pub fn generate_payment_id(now: DateTime<Utc>) -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("PAY_{}_{}", token.to_uppercase(), now.timestamp())
}

/// Which orders the caller may manage: `None` for admins (all of them),
/// otherwise the caller's approved artist profile id.
pub async fn manager_scope(state: &AppState, user: &AuthUser) -> AppResult<Option<Uuid>> {
    if user.is_admin() {
        return Ok(None);
    }
    let artist = approved_artist(state, user).await?;
    Ok(Some(artist.id))
}

fn ensure_can_manage(scope: Option<Uuid>, order: &OrderModel) -> AppResult<()> {
    match scope {
        Some(artist_id) if artist_id != order.artist_id => Err(AppError::Forbidden(
            "You are not allowed to manage this order".into(),
        )),
        _ => Ok(()),
    }
}

fn detail(order: OrderModel, artwork: Option<Artwork>, transaction: Option<Transaction>) -> OrderDetail {
    let can_ship = can_ship(order.payment_status, order.shipping_status);
    let can_deliver = can_deliver(order.payment_status, order.shipping_status);
    OrderDetail {
        order: Order::from(order),
        artwork,
        transaction,
        can_ship,
        can_deliver,
    }
}

/// Orders with their artworks attached, keeping the query order.
pub async fn with_artworks<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<OrderDetail>> {
    let ids: Vec<Uuid> = orders.iter().map(|o| o.artwork_id).collect();
    let artworks = Artworks::find()
        .filter(ArtworkCol::Id.is_in(ids))
        .all(conn)
        .await?;
    let artworks: HashMap<Uuid, Artwork> = with_artists(conn, artworks)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| {
            let artwork = artworks.get(&order.artwork_id).cloned();
            detail(order, artwork, None)
        })
        .collect())
}

/// Order with artwork and settlement record.
pub async fn full_detail<C: ConnectionTrait>(conn: &C, order: OrderModel) -> AppResult<OrderDetail> {
    let artwork = Artworks::find_by_id(order.artwork_id).one(conn).await?;
    let artwork = match artwork {
        Some(model) => with_artists(conn, vec![model]).await?.pop(),
        None => None,
    };
    let transaction = Transactions::find()
        .filter(TransactionCol::OrderId.eq(order.id))
        .one(conn)
        .await?
        .map(Transaction::from);
    Ok(detail(order, artwork, transaction))
}

pub async fn paged_orders(
    state: &AppState,
    finder: Select<Orders>,
    page: Page,
) -> AppResult<(Vec<OrderDetail>, Meta)> {
    let total = finder.clone().count(&state.orm).await? as i64;
    let orders = finder
        .limit(page.per_page as u64)
        .offset(page.offset as u64)
        .all(&state.orm)
        .await?;
    let items = with_artworks(&state.orm, orders).await?;
    Ok((items, Meta::new(page.page, page.per_page, total)))
}

/// Place an order and settle the payment in a single transaction.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_buyer(user)?;

    let txn = state.orm.begin().await?;

    let artwork = Artworks::find_by_id(payload.artwork_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .filter(|a| a.status != ArtworkStatus::Deleted)
        .ok_or_else(|| AppError::not_found("Artwork"))?;

    let artist = Artists::find_by_id(artwork.artist_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Artist"))?;

    ensure_purchasable(artwork.status, artist.status)?;

    let split = CommissionSplit::calculate(artwork.price, artist.commission_rate);
    let now = Utc::now();

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        buyer_id: Set(user.user_id),
        artwork_id: Set(artwork.id),
        artist_id: Set(artist.id),
        total_amount: Set(split.total),
        commission: Set(split.commission),
        artist_earnings: Set(split.artist_earnings),
        payment_method: Set(payload.payment_method),
        payment_status: Set(PaymentStatus::Completed),
        payment_id: Set(Some(generate_payment_id(now))),
        shipping_status: Set(ShippingStatus::Pending),
        tracking_number: Set(None),
        buyer_name: Set(payload.buyer_name),
        buyer_phone: Set(payload.buyer_phone),
        shipping_address: Set(payload.shipping_address),
        delivered_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let price = artwork.price;
    let mut sold: ArtworkActive = artwork.into();
    sold.status = Set(ArtworkStatus::Sold);
    sold.updated_at = Set(now.into());
    let artwork = sold.update(&txn).await?;

    Artists::update_many()
        .col_expr(ArtistCol::TotalSales, Expr::col(ArtistCol::TotalSales).add(price))
        .filter(ArtistCol::Id.eq(artist.id))
        .exec(&txn)
        .await?;

    let transaction = TransactionActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        artist_id: Set(artist.id),
        amount: Set(split.total),
        commission: Set(split.commission),
        net_amount: Set(split.artist_earnings),
        status: Set(TransactionStatus::Pending),
        transfer_date: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        artwork_id = %artwork.id,
        total = split.total,
        commission = split.commission,
        "order created"
    );
    notifications::order_confirmation(order.buyer_id, order.id);
    notifications::artist_new_order(artist.id, order.id, split.artist_earnings);
    audit::record(
        &state.pool,
        user.user_id,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "artwork_id": artwork.id, "total": split.total }),
    )
    .await;

    let artwork = with_artists(&state.orm, vec![artwork]).await?.pop();
    let data = detail(order, artwork, Some(Transaction::from(transaction)));
    Ok(ApiResponse::success("Order placed", data, None))
}

pub async fn list_buyer_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_buyer(user)?;
    let finder = Orders::find()
        .filter(OrderCol::BuyerId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt);

    let (items, meta) = paged_orders(state, finder, pagination.normalize(10, 50)).await?;
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn buyer_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_buyer(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    if order.buyer_id != user.user_id {
        return Err(AppError::Forbidden("This order belongs to another buyer".into()));
    }

    let data = full_detail(&state.orm, order).await?;
    Ok(ApiResponse::success("Order", data, None))
}

pub async fn list_managed_orders(
    state: &AppState,
    user: &AuthUser,
    query: ArtistOrderQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let scope = manager_scope(state, user).await?;

    let mut finder = Orders::find();
    if let Some(artist_id) = scope {
        finder = finder.filter(OrderCol::ArtistId.eq(artist_id));
    }
    if let Some(status) = query.shipping_status {
        finder = finder.filter(OrderCol::ShippingStatus.eq(status));
    }
    let finder = finder.order_by_desc(OrderCol::CreatedAt);

    let (items, meta) = paged_orders(state, finder, query.pagination().normalize(10, 50)).await?;
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn managed_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    let scope = manager_scope(state, user).await?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    ensure_can_manage(scope, &order)?;

    let data = full_detail(&state.orm, order).await?;
    Ok(ApiResponse::success("Order", data, None))
}

pub async fn ship_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ShipOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    let scope = manager_scope(state, user).await?;

    let txn = state.orm.begin().await?;
    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    ensure_can_manage(scope, &order)?;
    ensure_shippable(order.payment_status, order.shipping_status)?;

    let mut active: OrderActive = order.into();
    active.shipping_status = Set(ShippingStatus::Shipped);
    active.tracking_number = Set(Some(payload.tracking_number));
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    let tracking = order.tracking_number.clone().unwrap_or_default();
    tracing::info!(order_id = %order.id, tracking_number = %tracking, "order shipped");
    notifications::order_shipped(order.buyer_id, order.id, &tracking);
    audit::record(
        &state.pool,
        user.user_id,
        "order_ship",
        "orders",
        serde_json::json!({ "order_id": order.id, "tracking_number": tracking }),
    )
    .await;

    let data = full_detail(&state.orm, order).await?;
    Ok(ApiResponse::success("Order marked as shipped", data, None))
}

/// Confirm delivery and finalize the artist's settlement.
pub async fn deliver_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    let scope = manager_scope(state, user).await?;

    let txn = state.orm.begin().await?;
    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    ensure_can_manage(scope, &order)?;
    ensure_deliverable(order.payment_status, order.shipping_status)?;

    let now = Utc::now();
    let mut active: OrderActive = order.into();
    active.shipping_status = Set(ShippingStatus::Delivered);
    active.delivered_at = Set(Some(now.into()));
    active.updated_at = Set(now.into());
    let order = active.update(&txn).await?;

    let existing = Transactions::find()
        .filter(TransactionCol::OrderId.eq(order.id))
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let settlement = match existing {
        Some(model) => {
            let mut active: TransactionActive = model.into();
            active.amount = Set(order.total_amount);
            active.commission = Set(order.commission);
            active.net_amount = Set(order.artist_earnings);
            active.status = Set(TransactionStatus::Completed);
            active.transfer_date = Set(Some(now.into()));
            active.updated_at = Set(now.into());
            active.update(&txn).await?
        }
        None => {
            TransactionActive {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                artist_id: Set(order.artist_id),
                amount: Set(order.total_amount),
                commission: Set(order.commission),
                net_amount: Set(order.artist_earnings),
                status: Set(TransactionStatus::Completed),
                transfer_date: Set(Some(now.into())),
                created_at: NotSet,
                updated_at: Set(now.into()),
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;

    tracing::info!(order_id = %order.id, artist_id = %order.artist_id, "order delivered");
    notifications::order_delivered(order.buyer_id, order.id);
    notifications::payout_scheduled(order.artist_id, order.id, order.artist_earnings);
    audit::record(
        &state.pool,
        user.user_id,
        "order_deliver",
        "orders",
        serde_json::json!({ "order_id": order.id, "transaction_id": settlement.id }),
    )
    .await;

    let data = full_detail(&state.orm, order).await?;
    Ok(ApiResponse::success("Order marked as delivered", data, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn payment_id_shape() {
        let now = Utc.with_ymd_and_hms(2025, 11, 22, 8, 0, 0).unwrap();
        let id = generate_payment_id(now);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "PAY");
        assert_eq!(parts[1].len(), 10);
        assert!(parts[1].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(parts[2], now.timestamp().to_string());
    }

    fn order(artist_id: Uuid) -> OrderModel {
        let now = Utc::now().fixed_offset();
        OrderModel {
            id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            artwork_id: Uuid::new_v4(),
            artist_id,
            total_amount: 1000,
            commission: 250,
            artist_earnings: 750,
            payment_method: crate::entity::sea_orm_active_enums::PaymentMethod::Visa,
            payment_status: PaymentStatus::Completed,
            payment_id: None,
            shipping_status: ShippingStatus::Pending,
            tracking_number: None,
            buyer_name: "Sara".into(),
            buyer_phone: "0551234567".into(),
            shipping_address: "Riyadh".into(),
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn artists_manage_only_their_orders() {
        let mine = Uuid::new_v4();
        let order = order(mine);
        assert!(ensure_can_manage(Some(mine), &order).is_ok());
        assert!(ensure_can_manage(None, &order).is_ok());
        assert!(matches!(
            ensure_can_manage(Some(Uuid::new_v4()), &order),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn detail_flags_follow_state() {
        let d = detail(order(Uuid::new_v4()), None, None);
        assert!(d.can_ship);
        assert!(!d.can_deliver);
    }
}
