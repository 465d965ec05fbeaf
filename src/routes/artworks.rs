use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::artworks::{ArtworkList, Category},
    error::{AppResult, ErrorResponse},
    extract::{ApiPath, ApiQuery},
    models::Artwork,
    response::ApiResponse,
    routes::params::{ArtistSearchQuery, ArtworkQuery, Pagination},
    services::artwork_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_artworks))
        .route("/featured", get(featured_artworks))
        .route("/categories", get(categories))
        .route("/search", get(search_by_artist))
        .route("/{id}", get(show_artwork))
}

#[utoipa::path(
    get,
    path = "/api/artworks",
    params(ArtworkQuery),
    responses(
        (status = 200, description = "Available artworks of approved artists", body = ApiResponse<ArtworkList>),
    ),
    tag = "Artworks"
)]
pub async fn list_artworks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ArtworkQuery>,
) -> AppResult<Json<ApiResponse<ArtworkList>>> {
    let resp = artwork_service::list_artworks(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/artworks/featured",
    params(Pagination),
    responses(
        (status = 200, description = "Artworks by featured artists", body = ApiResponse<ArtworkList>),
    ),
    tag = "Artworks"
)]
pub async fn featured_artworks(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ArtworkList>>> {
    let resp = artwork_service::featured_artworks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/artworks/categories",
    responses(
        (status = 200, description = "Artwork categories", body = ApiResponse<Vec<Category>>),
    ),
    tag = "Artworks"
)]
pub async fn categories() -> Json<ApiResponse<Vec<Category>>> {
    Json(artwork_service::categories())
}

#[utoipa::path(
    get,
    path = "/api/artworks/search",
    params(ArtistSearchQuery),
    responses(
        (status = 200, description = "Artworks whose artist name matches", body = ApiResponse<ArtworkList>),
        (status = 422, description = "Missing artist name", body = ErrorResponse)
    ),
    tag = "Artworks"
)]
pub async fn search_by_artist(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ArtistSearchQuery>,
) -> AppResult<Json<ApiResponse<ArtworkList>>> {
    let resp = artwork_service::search_by_artist(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/artworks/{id}",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Artwork detail; counts a view", body = ApiResponse<Artwork>),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    tag = "Artworks"
)]
pub async fn show_artwork(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Artwork>>> {
    let resp = artwork_service::show_artwork(&state, id).await?;
    Ok(Json(resp))
}
