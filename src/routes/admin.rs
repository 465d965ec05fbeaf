use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        admin::{
            AdminArtworkList, AdminOrderList, ApproveArtistRequest, ArtistReview,
            ArtistReviewList, DashboardStats, RejectArtistRequest, UpdateArtworkStatusRequest,
        },
        orders::{OrderDetail, ShipOrderRequest},
    },
    error::{AppResult, ErrorResponse},
    extract::{ApiPath, ApiQuery, ValidatedJson},
    middleware::auth::AuthUser,
    models::{ArtistProfile, Artwork},
    response::ApiResponse,
    routes::params::{AdminArtworkQuery, AdminOrderQuery, Pagination},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/artists/pending", get(pending_artists))
        .route("/artists/{id}", get(artist_detail))
        .route("/artists/{id}/approve", post(approve_artist))
        .route("/artists/{id}/reject", post(reject_artist))
        .route("/artworks", get(list_artworks))
        .route("/artworks/{id}", get(artwork_detail))
        .route("/artworks/{id}/status", put(update_artwork_status))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(order_detail))
        .route("/orders/{id}/ship", put(ship_order))
        .route("/orders/{id}/deliver", put(deliver_order))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Artist and user counts", body = ApiResponse<DashboardStats>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = admin_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/artists/pending",
    params(Pagination),
    responses(
        (status = 200, description = "Applications awaiting review, oldest first", body = ApiResponse<ArtistReviewList>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn pending_artists(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ArtistReviewList>>> {
    let resp = admin_service::pending_artists(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/artists/{id}",
    params(("id" = Uuid, Path, description = "Artist ID")),
    responses(
        (status = 200, description = "Artist application with samples", body = ApiResponse<ArtistReview>),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn artist_detail(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<ArtistReview>>> {
    let resp = admin_service::artist_detail(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/artists/{id}/approve",
    params(("id" = Uuid, Path, description = "Artist ID")),
    request_body = ApproveArtistRequest,
    responses(
        (status = 200, description = "Artist approved", body = ApiResponse<ArtistProfile>),
        (status = 400, description = "Artist is not pending", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_artist(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<ApproveArtistRequest>,
) -> AppResult<Json<ApiResponse<ArtistProfile>>> {
    let resp = admin_service::approve_artist(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/artists/{id}/reject",
    params(("id" = Uuid, Path, description = "Artist ID")),
    request_body = RejectArtistRequest,
    responses(
        (status = 200, description = "Artist rejected; may reapply after 30 days", body = ApiResponse<ArtistProfile>),
        (status = 400, description = "Artist is not pending", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reject_artist(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<RejectArtistRequest>,
) -> AppResult<Json<ApiResponse<ArtistProfile>>> {
    let resp = admin_service::reject_artist(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/artworks",
    params(AdminArtworkQuery),
    responses(
        (status = 200, description = "All artworks with status counts", body = ApiResponse<AdminArtworkList>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_artworks(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<AdminArtworkQuery>,
) -> AppResult<Json<ApiResponse<AdminArtworkList>>> {
    let resp = admin_service::list_artworks(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/artworks/{id}",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Artwork detail", body = ApiResponse<Artwork>),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn artwork_detail(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Artwork>>> {
    let resp = admin_service::artwork_detail(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/artworks/{id}/status",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    request_body = UpdateArtworkStatusRequest,
    responses(
        (status = 200, description = "Artwork status updated", body = ApiResponse<Artwork>),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_artwork_status(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateArtworkStatusRequest>,
) -> AppResult<Json<ApiResponse<Artwork>>> {
    let resp = admin_service::update_artwork_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(AdminOrderQuery),
    responses(
        (status = 200, description = "All orders with shipping counts", body = ApiResponse<AdminOrderList>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<AdminOrderQuery>,
) -> AppResult<Json<ApiResponse<AdminOrderList>>> {
    let resp = admin_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with artwork and settlement", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn order_detail(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = admin_service::order_detail(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/ship",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = ShipOrderRequest,
    responses(
        (status = 200, description = "Order shipped", body = ApiResponse<OrderDetail>),
        (status = 400, description = "Order is not awaiting shipment", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn ship_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<ShipOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = admin_service::ship_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/deliver",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order delivered and settlement completed", body = ApiResponse<OrderDetail>),
        (status = 400, description = "Order has not shipped", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn deliver_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = admin_service::deliver_order(&state, &user, id).await?;
    Ok(Json(resp))
}
