use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::rules;
use crate::{
    entity::sea_orm_active_enums::ArtworkStatus,
    models::{ArtistProfile, ArtistSample, Artwork, User},
};

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct ApproveArtistRequest {
    #[validate(range(min = 5, max = 50, message = "Commission rate must be between 5 and 50"))]
    pub commission_rate: Option<i32>,
    pub featured: Option<bool>,
    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes_admin: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RejectArtistRequest {
    #[validate(length(min = 1, max = 1000, message = "Rejection reason is required (max 1000 characters)"))]
    pub reason: String,
    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes_admin: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateArtworkStatusRequest {
    #[validate(custom(function = "rules::editable_status"))]
    pub status: ArtworkStatus,
}

/// An artist application with everything an admin needs to review it.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistReview {
    pub artist: ArtistProfile,
    pub user: User,
    pub samples: Vec<ArtistSample>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistReviewList {
    pub items: Vec<ArtistReview>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub pending_artists: u64,
    pub approved_artists: u64,
    pub rejected_artists: u64,
    pub total_users: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtworkStats {
    pub total: u64,
    pub available: u64,
    pub sold: u64,
    pub pending: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminArtworkList {
    pub items: Vec<Artwork>,
    pub stats: ArtworkStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderStats {
    pub total: u64,
    pub pending: u64,
    pub shipped: u64,
    pub delivered: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOrderList {
    pub items: Vec<super::orders::OrderDetail>,
    pub stats: OrderStats,
}
