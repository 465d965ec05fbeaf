use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;

use crate::{
    audit,
    domain::catalog::CATEGORIES,
    dto::artworks::{ArtworkList, Category, CreateArtworkRequest, UpdateArtworkRequest},
    entity::{
        Artists, Artworks, Users, artists,
        artworks::{self, ActiveModel as ArtworkActive, Column as ArtworkCol, Model as ArtworkModel},
        sea_orm_active_enums::{ArtistStatus, ArtworkStatus},
        users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ArtistSummary, Artwork},
    response::{ApiResponse, Meta},
    routes::params::{
        ArtistSearchQuery, ArtworkQuery, ArtworkSort, OwnArtworkQuery, Pagination, filter_value,
    },
    services::artist_service::approved_artist,
    state::AppState,
};

/// Available artworks whose artist is approved.
fn public_catalog() -> Select<Artworks> {
    Artworks::find()
        .join(JoinType::InnerJoin, artworks::Relation::Artists.def())
        .filter(ArtworkCol::Status.eq(ArtworkStatus::Available))
        .filter(artists::Column::Status.eq(ArtistStatus::Approved))
}

fn like(value: &str) -> String {
    format!("%{}%", value)
}

/// Attach the artist summary to each artwork, preserving order.
pub async fn with_artists<C: ConnectionTrait>(
    conn: &C,
    models: Vec<ArtworkModel>,
) -> AppResult<Vec<Artwork>> {
    let artist_ids: Vec<Uuid> = models.iter().map(|m| m.artist_id).collect();
    if artist_ids.is_empty() {
        return Ok(Vec::new());
    }

    let artists = Artists::find()
        .filter(artists::Column::Id.is_in(artist_ids))
        .all(conn)
        .await?;
    let user_ids: Vec<Uuid> = artists.iter().map(|a| a.user_id).collect();
    let users: HashMap<Uuid, users::Model> = Users::find()
        .filter(users::Column::Id.is_in(user_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let summaries: HashMap<Uuid, ArtistSummary> = artists
        .iter()
        .filter_map(|a| users.get(&a.user_id).map(|u| (a.id, ArtistSummary::new(a, u))))
        .collect();

    Ok(models
        .into_iter()
        .map(|m| {
            let summary = summaries.get(&m.artist_id).cloned();
            Artwork::from(m).with_artist(summary)
        })
        .collect())
}

async fn paged(
    state: &AppState,
    finder: Select<Artworks>,
    pagination: Pagination,
    default: i64,
    max: i64,
) -> AppResult<(Vec<Artwork>, Meta)> {
    let page = pagination.normalize(default, max);
    let total = finder.clone().count(&state.orm).await? as i64;
    let models = finder
        .limit(page.per_page as u64)
        .offset(page.offset as u64)
        .all(&state.orm)
        .await?;
    let items = with_artists(&state.orm, models).await?;
    Ok((items, Meta::new(page.page, page.per_page, total)))
}

pub async fn list_artworks(
    state: &AppState,
    query: ArtworkQuery,
) -> AppResult<ApiResponse<ArtworkList>> {
    let mut condition = Condition::all();

    if let Some(search) = filter_value(&query.q) {
        let pattern = like(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Artworks, ArtworkCol::Title)).ilike(pattern.clone()))
                .add(Expr::col((Artworks, ArtworkCol::Description)).ilike(pattern)),
        );
    }
    if let Some(category) = filter_value(&query.category) {
        condition = condition.add(ArtworkCol::Category.eq(category));
    }
    if let Some(city) = filter_value(&query.city) {
        condition = condition.add(Expr::col((Artists, artists::Column::City)).ilike(like(city)));
    }
    if let Some(min) = query.price_min {
        condition = condition.add(ArtworkCol::Price.gte(min));
    }
    if let Some(max) = query.price_max {
        condition = condition.add(ArtworkCol::Price.lte(max));
    }

    let finder = public_catalog().filter(condition);
    let finder = match query.sort.unwrap_or_default() {
        ArtworkSort::Latest => finder.order_by_desc(ArtworkCol::CreatedAt),
        ArtworkSort::Oldest => finder.order_by_asc(ArtworkCol::CreatedAt),
        ArtworkSort::HighestPrice => finder.order_by_desc(ArtworkCol::Price),
        ArtworkSort::LowestPrice => finder.order_by_asc(ArtworkCol::Price),
        ArtworkSort::MostViewed => finder.order_by_desc(ArtworkCol::Views),
        ArtworkSort::MostLiked => finder.order_by_desc(ArtworkCol::Likes),
    };

    let (items, meta) = paged(state, finder, query.pagination(), 12, 50).await?;
    Ok(ApiResponse::success("Artworks", ArtworkList { items }, Some(meta)))
}

pub async fn featured_artworks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ArtworkList>> {
    let finder = public_catalog()
        .filter(artists::Column::Featured.eq(true))
        .order_by_desc(ArtworkCol::CreatedAt);

    let (items, meta) = paged(state, finder, pagination, 8, 20).await?;
    Ok(ApiResponse::success("Featured artworks", ArtworkList { items }, Some(meta)))
}

pub fn categories() -> ApiResponse<Vec<Category>> {
    let data = CATEGORIES
        .iter()
        .map(|(value, label)| Category {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect();
    ApiResponse::success("Categories", data, None)
}

pub async fn search_by_artist(
    state: &AppState,
    query: ArtistSearchQuery,
) -> AppResult<ApiResponse<ArtworkList>> {
    let name = filter_value(&query.artist)
        .ok_or_else(|| AppError::field("artist", "The artist name is required"))?;

    let finder = public_catalog()
        .join(JoinType::InnerJoin, artists::Relation::Users.def())
        .filter(Expr::col((Users, users::Column::Name)).ilike(like(name)))
        .order_by_desc(ArtworkCol::CreatedAt);

    let (items, meta) = paged(state, finder, query.pagination(), 12, 50).await?;
    Ok(ApiResponse::success("Artworks", ArtworkList { items }, Some(meta)))
}

/// Public detail view. Every fetch counts as a view.
pub async fn show_artwork(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Artwork>> {
    let model = public_catalog()
        .filter(ArtworkCol::Id.eq(id))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Artwork"))?;

    Artworks::update_many()
        .col_expr(ArtworkCol::Views, Expr::col(ArtworkCol::Views).add(1))
        .filter(ArtworkCol::Id.eq(id))
        .exec(&state.orm)
        .await?;

    let model = ArtworkModel {
        views: model.views + 1,
        ..model
    };
    let artwork = with_artists(&state.orm, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::not_found("Artwork"))?;
    Ok(ApiResponse::success("Artwork", artwork, None))
}

async fn find_own(state: &AppState, artist_id: Uuid, id: Uuid) -> AppResult<ArtworkModel> {
    Artworks::find_by_id(id)
        .filter(ArtworkCol::ArtistId.eq(artist_id))
        .filter(ArtworkCol::Status.ne(ArtworkStatus::Deleted))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Artwork"))
}

pub async fn list_own_artworks(
    state: &AppState,
    user: &AuthUser,
    query: OwnArtworkQuery,
) -> AppResult<ApiResponse<ArtworkList>> {
    let artist = approved_artist(state, user).await?;

    let mut finder = Artworks::find().filter(ArtworkCol::ArtistId.eq(artist.id));
    finder = match query.status {
        Some(status) => finder.filter(ArtworkCol::Status.eq(status)),
        None => finder.filter(ArtworkCol::Status.ne(ArtworkStatus::Deleted)),
    };
    let finder = finder.order_by_desc(ArtworkCol::CreatedAt);

    let page = query.pagination().normalize(12, 50);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(page.per_page as u64)
        .offset(page.offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Artwork::from)
        .collect();

    let meta = Meta::new(page.page, page.per_page, total);
    Ok(ApiResponse::success("Your artworks", ArtworkList { items }, Some(meta)))
}

pub async fn create_artwork(
    state: &AppState,
    user: &AuthUser,
    payload: CreateArtworkRequest,
) -> AppResult<ApiResponse<Artwork>> {
    let artist = approved_artist(state, user).await?;

    let artwork = ArtworkActive {
        id: Set(Uuid::new_v4()),
        artist_id: Set(artist.id),
        title: Set(payload.title),
        description: Set(payload.description),
        price: Set(payload.price),
        category: Set(payload.category),
        dimensions: Set(payload.dimensions),
        materials: Set(payload.materials),
        images: Set(serde_json::json!(payload.images)),
        status: Set(ArtworkStatus::Available),
        views: Set(0),
        likes: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(artwork_id = %artwork.id, artist_id = %artist.id, "artwork created");
    audit::record(
        &state.pool,
        user.user_id,
        "artwork_create",
        "artworks",
        serde_json::json!({ "artwork_id": artwork.id }),
    )
    .await;

    Ok(ApiResponse::success("Artwork created", Artwork::from(artwork), None))
}

pub async fn show_own_artwork(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Artwork>> {
    let artist = approved_artist(state, user).await?;
    let artwork = find_own(state, artist.id, id).await?;
    Ok(ApiResponse::success("Artwork", Artwork::from(artwork), None))
}

pub async fn update_own_artwork(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateArtworkRequest,
) -> AppResult<ApiResponse<Artwork>> {
    let artist = approved_artist(state, user).await?;
    let existing = find_own(state, artist.id, id).await?;

    let mut active: ArtworkActive = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(dimensions) = payload.dimensions {
        active.dimensions = Set(Some(dimensions));
    }
    if let Some(materials) = payload.materials {
        active.materials = Set(Some(materials));
    }
    if let Some(images) = payload.images {
        active.images = Set(serde_json::json!(images));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());
    let artwork = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "artwork_update",
        "artworks",
        serde_json::json!({ "artwork_id": artwork.id }),
    )
    .await;

    Ok(ApiResponse::success("Artwork updated", Artwork::from(artwork), None))
}

/// Soft delete: the row stays for order history but leaves every listing.
pub async fn delete_own_artwork(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let artist = approved_artist(state, user).await?;
    let existing = find_own(state, artist.id, id).await?;

    let mut active: ArtworkActive = existing.into();
    active.status = Set(ArtworkStatus::Deleted);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "artwork_delete",
        "artworks",
        serde_json::json!({ "artwork_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Artwork deleted",
        serde_json::json!({ "id": id }),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_list_is_complete() {
        let resp = categories();
        let data = resp.data.unwrap();
        assert_eq!(data.len(), 7);
        assert_eq!(data[0].value, "painting");
        assert!(data.iter().any(|c| c.value == "calligraphy" && c.label == "Calligraphy"));
    }

    #[test]
    fn like_pattern_wraps_value() {
        assert_eq!(like("oil"), "%oil%");
    }
}
