pub mod admin_service;
pub mod artist_service;
pub mod artwork_service;
pub mod auth_service;
pub mod order_service;
