use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::artists::{ArtistRegisterRequest, ArtistRegistrationResponse, ArtistStatusView},
    error::{AppResult, ErrorResponse},
    extract::ValidatedJson,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::artist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_artist))
        .route("/status", get(application_status))
}

#[utoipa::path(
    post,
    path = "/api/artists/register",
    request_body = ArtistRegisterRequest,
    responses(
        (status = 201, description = "Artist application submitted", body = ApiResponse<ArtistRegistrationResponse>),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Artists"
)]
pub async fn register_artist(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ArtistRegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ArtistRegistrationResponse>>)> {
    let resp = artist_service::register_artist(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/artists/status",
    responses(
        (status = 200, description = "Review status of the caller's application", body = ApiResponse<ArtistStatusView>),
        (status = 403, description = "Caller is not an artist", body = ErrorResponse),
        (status = 404, description = "No artist profile", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Artists"
)]
pub async fn application_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ArtistStatusView>>> {
    let resp = artist_service::application_status(&state, &user).await?;
    Ok(Json(resp))
}
