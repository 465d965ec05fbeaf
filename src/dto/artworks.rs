use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::rules;
use crate::{entity::sea_orm_active_enums::ArtworkStatus, models::Artwork};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateArtworkRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Description is required (max 2000 characters)"))]
    pub description: String,
    #[validate(range(min = 500, max = 10000, message = "Price must be between 500 and 10000"))]
    pub price: i64,
    #[validate(custom(function = "rules::category"))]
    pub category: String,
    #[validate(length(max = 100, message = "Dimensions must not exceed 100 characters"))]
    pub dimensions: Option<String>,
    #[validate(length(max = 255, message = "Materials must not exceed 255 characters"))]
    pub materials: Option<String>,
    #[validate(
        length(min = 1, max = 5, message = "Provide between 1 and 5 images"),
        custom(function = "rules::image_urls")
    )]
    pub images: Vec<String>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateArtworkRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "Description must be 1 to 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 500, max = 10000, message = "Price must be between 500 and 10000"))]
    pub price: Option<i64>,
    #[validate(custom(function = "rules::category"))]
    pub category: Option<String>,
    #[validate(length(max = 100, message = "Dimensions must not exceed 100 characters"))]
    pub dimensions: Option<String>,
    #[validate(length(max = 255, message = "Materials must not exceed 255 characters"))]
    pub materials: Option<String>,
    #[validate(
        length(min = 1, max = 5, message = "Provide between 1 and 5 images"),
        custom(function = "rules::image_urls")
    )]
    pub images: Option<Vec<String>>,
    #[validate(custom(function = "rules::editable_status"))]
    pub status: Option<ArtworkStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtworkList {
    pub items: Vec<Artwork>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Category {
    pub value: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateArtworkRequest {
        CreateArtworkRequest {
            title: "Desert Light".into(),
            description: "Acrylic on canvas".into(),
            price: 1500,
            category: "painting".into(),
            dimensions: Some("60x90 cm".into()),
            materials: None,
            images: vec!["https://cdn.test/desert.jpg".into()],
        }
    }

    #[test]
    fn price_bounds() {
        let mut req = request();
        req.price = 500;
        assert!(req.validate().is_ok());
        req.price = 499;
        assert!(req.validate().unwrap_err().field_errors().contains_key("price"));
        req.price = 10_001;
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_category_rejected() {
        let mut req = request();
        req.category = "pottery".into();
        assert!(req.validate().unwrap_err().field_errors().contains_key("category"));
    }

    #[test]
    fn image_count_limits() {
        let mut req = request();
        req.images.clear();
        assert!(req.validate().is_err());
        req.images = (0..6).map(|i| format!("https://cdn.test/{i}.jpg")).collect();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_cannot_mark_deleted() {
        let req = UpdateArtworkRequest {
            status: Some(ArtworkStatus::Deleted),
            ..Default::default()
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("status"));

        let req = UpdateArtworkRequest {
            status: Some(ArtworkStatus::Pending),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
