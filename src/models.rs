use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    artist_samples, artists, artworks, orders,
    sea_orm_active_enums::{
        ArtistStatus, ArtworkStatus, PaymentMethod, PaymentStatus, ShippingStatus,
        SubscriptionTier, TransactionStatus, UserRole,
    },
    transactions, users,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            email_verified: model.email_verified,
            avatar_url: model.avatar_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: ArtistStatus,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub commission_rate: i32,
    pub total_sales: i64,
    pub verified: bool,
    pub featured: bool,
    pub rejection_reason: Option<String>,
    pub can_reapply_at: Option<DateTime<Utc>>,
    pub notes_admin: Option<String>,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<artists::Model> for ArtistProfile {
    fn from(model: artists::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status,
            bio: model.bio,
            phone: model.phone,
            city: model.city,
            subscription_tier: model.subscription_tier,
            commission_rate: model.commission_rate,
            total_sales: model.total_sales,
            verified: model.verified,
            featured: model.featured,
            rejection_reason: model.rejection_reason,
            can_reapply_at: model.can_reapply_at.map(|dt| dt.with_timezone(&Utc)),
            notes_admin: model.notes_admin,
            approved_by: model.approved_by,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistSample {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<artist_samples::Model> for ArtistSample {
    fn from(model: artist_samples::Model) -> Self {
        Self {
            id: model.id,
            artist_id: model.artist_id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Public-facing summary of the artist behind an artwork or order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistSummary {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub verified: bool,
    pub featured: bool,
}

impl ArtistSummary {
    pub fn new(artist: &artists::Model, user: &users::Model) -> Self {
        Self {
            id: artist.id,
            name: user.name.clone(),
            city: artist.city.clone(),
            verified: artist.verified,
            featured: artist.featured,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Artwork {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub dimensions: Option<String>,
    pub materials: Option<String>,
    pub images: Vec<String>,
    pub main_image: Option<String>,
    pub status: ArtworkStatus,
    pub views: i32,
    pub likes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artwork {
    pub fn with_artist(mut self, artist: Option<ArtistSummary>) -> Self {
        self.artist = artist;
        self
    }
}

impl From<artworks::Model> for Artwork {
    fn from(model: artworks::Model) -> Self {
        let images: Vec<String> = serde_json::from_value(model.images).unwrap_or_default();
        Self {
            id: model.id,
            artist_id: model.artist_id,
            title: model.title,
            description: model.description,
            price: model.price,
            category: model.category,
            dimensions: model.dimensions,
            materials: model.materials,
            main_image: images.first().cloned(),
            images,
            status: model.status,
            views: model.views,
            likes: model.likes,
            artist: None,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub artwork_id: Uuid,
    pub artist_id: Uuid,
    pub total_amount: i64,
    pub commission: i64,
    pub artist_earnings: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub shipping_status: ShippingStatus,
    pub tracking_number: Option<String>,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub shipping_address: String,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            buyer_id: model.buyer_id,
            artwork_id: model.artwork_id,
            artist_id: model.artist_id,
            total_amount: model.total_amount,
            commission: model.commission,
            artist_earnings: model.artist_earnings,
            payment_method: model.payment_method,
            payment_status: model.payment_status,
            payment_id: model.payment_id,
            shipping_status: model.shipping_status,
            tracking_number: model.tracking_number,
            buyer_name: model.buyer_name,
            buyer_phone: model.buyer_phone,
            shipping_address: model.shipping_address,
            delivered_at: model.delivered_at.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub order_id: Uuid,
    pub artist_id: Uuid,
    pub amount: i64,
    pub commission: i64,
    pub net_amount: i64,
    pub status: TransactionStatus,
    pub transfer_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<transactions::Model> for Transaction {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            artist_id: model.artist_id,
            amount: model.amount,
            commission: model.commission,
            net_amount: model.net_amount,
            status: model.status,
            transfer_date: model.transfer_date.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_image_is_the_cover() {
        let now = Utc::now().fixed_offset();
        let model = artworks::Model {
            id: Uuid::new_v4(),
            artist_id: Uuid::new_v4(),
            title: "Dunes".into(),
            description: "Oil on canvas".into(),
            price: 1200,
            category: "painting".into(),
            dimensions: None,
            materials: None,
            images: serde_json::json!(["https://cdn.test/a.jpg", "https://cdn.test/b.jpg"]),
            status: ArtworkStatus::Available,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
        };

        let artwork = Artwork::from(model);
        assert_eq!(artwork.images.len(), 2);
        assert_eq!(artwork.main_image.as_deref(), Some("https://cdn.test/a.jpg"));
    }
}
