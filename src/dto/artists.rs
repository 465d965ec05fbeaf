use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::sea_orm_active_enums::SubscriptionTier,
    models::{ArtistProfile, ArtistSample, User},
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct SampleInput {
    #[validate(length(min = 1, max = 255, message = "Sample title is required (max 255 characters)"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Sample description must not exceed 1000 characters"))]
    pub description: Option<String>,
    #[validate(url(message = "Sample image must be a valid URL"))]
    pub image_url: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ArtistRegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(
        email(message = "Email is not valid"),
        length(max = 320, message = "Email must not exceed 320 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required (max 20 characters)"))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "City is required (max 100 characters)"))]
    pub city: String,
    #[validate(length(min = 1, max = 500, message = "Bio is required (max 500 characters)"))]
    pub bio: String,
    #[validate(length(min = 3, max = 5, message = "Provide between 3 and 5 samples"), nested)]
    pub samples: Vec<SampleInput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistRegistrationResponse {
    pub user: User,
    pub artist: ArtistProfile,
    pub samples: Vec<ArtistSample>,
    pub access_token: String,
    pub token_type: String,
    pub estimated_review_date: DateTime<Utc>,
}

/// What an artist sees about their own application.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtistStatusView {
    Pending {
        submitted_at: DateTime<Utc>,
        samples_count: u64,
        estimated_review_date: DateTime<Utc>,
    },
    Approved {
        commission_rate: i32,
        subscription_tier: SubscriptionTier,
        total_sales: i64,
        verified: bool,
        featured: bool,
        approved_at: DateTime<Utc>,
    },
    Rejected {
        rejection_reason: Option<String>,
        can_reapply_at: Option<DateTime<Utc>>,
        can_reapply_now: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample(n: usize) -> SampleInput {
        SampleInput {
            title: format!("Sample {n}"),
            description: None,
            image_url: format!("https://cdn.test/sample-{n}.jpg"),
        }
    }

    fn request(samples: usize) -> ArtistRegisterRequest {
        ArtistRegisterRequest {
            name: "Faisal".into(),
            email: "faisal@example.com".into(),
            password: "password1".into(),
            phone: "0551234567".into(),
            city: "Riyadh".into(),
            bio: "Calligrapher".into(),
            samples: (0..samples).map(sample).collect(),
        }
    }

    #[test]
    fn three_to_five_samples() {
        assert!(request(2).validate().is_err());
        assert!(request(3).validate().is_ok());
        assert!(request(5).validate().is_ok());
        assert!(request(6).validate().is_err());
    }

    #[test]
    fn nested_sample_errors_are_reported() {
        let mut req = request(3);
        req.samples[1].image_url = "nope".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("samples"));
    }
}
