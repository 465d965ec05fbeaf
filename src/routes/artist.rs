//! Routes for approved artists: their own catalog and the orders placed on it.
//! Admins may use the order routes too.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        artworks::{ArtworkList, CreateArtworkRequest, UpdateArtworkRequest},
        orders::{OrderDetail, OrderList, ShipOrderRequest},
    },
    error::{AppResult, ErrorResponse},
    extract::{ApiPath, ApiQuery, ValidatedJson},
    middleware::auth::AuthUser,
    models::Artwork,
    response::ApiResponse,
    routes::params::{ArtistOrderQuery, OwnArtworkQuery},
    services::{artwork_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/artworks", get(list_own_artworks).post(create_artwork))
        .route(
            "/artworks/{id}",
            get(show_own_artwork)
                .put(update_own_artwork)
                .delete(delete_own_artwork),
        )
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(show_order))
        .route("/orders/{id}/ship", put(ship_order))
        .route("/orders/{id}/deliver", put(deliver_order))
}

#[utoipa::path(
    get,
    path = "/api/artist/artworks",
    params(OwnArtworkQuery),
    responses(
        (status = 200, description = "The caller's artworks, deleted ones hidden unless requested", body = ApiResponse<ArtworkList>),
        (status = 403, description = "Not an approved artist", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn list_own_artworks(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<OwnArtworkQuery>,
) -> AppResult<Json<ApiResponse<ArtworkList>>> {
    let resp = artwork_service::list_own_artworks(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/artist/artworks",
    request_body = CreateArtworkRequest,
    responses(
        (status = 201, description = "Artwork created", body = ApiResponse<Artwork>),
        (status = 403, description = "Not an approved artist", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn create_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateArtworkRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Artwork>>)> {
    let resp = artwork_service::create_artwork(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/artist/artworks/{id}",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "One of the caller's artworks", body = ApiResponse<Artwork>),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn show_own_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Artwork>>> {
    let resp = artwork_service::show_own_artwork(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/artist/artworks/{id}",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    request_body = UpdateArtworkRequest,
    responses(
        (status = 200, description = "Artwork updated", body = ApiResponse<Artwork>),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn update_own_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateArtworkRequest>,
) -> AppResult<Json<ApiResponse<Artwork>>> {
    let resp = artwork_service::update_own_artwork(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/artist/artworks/{id}",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Artwork soft deleted"),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn delete_own_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = artwork_service::delete_own_artwork(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/artist/orders",
    params(ArtistOrderQuery),
    responses(
        (status = 200, description = "Orders on the caller's artworks (all orders for admins)", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ArtistOrderQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_managed_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/artist/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<OrderDetail>),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn show_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::managed_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/artist/orders/{id}/ship",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = ShipOrderRequest,
    responses(
        (status = 200, description = "Order shipped", body = ApiResponse<OrderDetail>),
        (status = 400, description = "Order is not awaiting shipment", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn ship_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<ShipOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::ship_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/artist/orders/{id}/deliver",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order delivered and settlement completed", body = ApiResponse<OrderDetail>),
        (status = 400, description = "Order has not shipped", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artist"
)]
pub async fn deliver_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::deliver_order(&state, &user, id).await?;
    Ok(Json(resp))
}
