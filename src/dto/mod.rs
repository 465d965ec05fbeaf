pub mod admin;
pub mod artists;
pub mod artworks;
pub mod auth;
pub mod orders;
mod rules;
