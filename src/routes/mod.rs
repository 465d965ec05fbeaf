use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod artist;
pub mod artists;
pub mod artworks;
pub mod auth;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/artists", artists::router())
        .nest("/artworks", artworks::router())
        .nest("/artist", artist::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
}
