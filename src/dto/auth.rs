use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::sea_orm_active_enums::UserRole,
    models::{ArtistProfile, User},
};

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(
        email(message = "Email is not valid"),
        length(max = 320, message = "Email must not exceed 320 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    pub password_confirmation: String,
    #[validate(url(message = "Avatar must be a valid URL"), length(max = 2048))]
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in_hours: i64,
    pub user: User,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MeResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistProfile>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Noura".into(),
            email: "noura@example.com".into(),
            password: "secret123".into(),
            password_confirmation: "secret123".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn valid_registration() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn confirmation_must_match() {
        let mut req = request();
        req.password_confirmation = "different1".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password_confirmation"));
    }

    #[test]
    fn short_password_and_bad_email() {
        let mut req = request();
        req.password = "short".into();
        req.password_confirmation = "short".into();
        req.email = "not-an-email".into();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }
}
