use axum::{extract::FromRequestParts, http::header};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::sea_orm_active_enums::UserRole,
    error::AppError,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

pub fn ensure_role(user: &AuthUser, role: UserRole) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden(
            "You are not allowed to perform this action".into(),
        ));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, UserRole::Admin)
}

pub fn ensure_buyer(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, UserRole::Buyer)
}

pub fn ensure_artist(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, UserRole::Artist)
}

/// Sign an HS256 token for `user_id` valid for `ttl_hours`.
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    role: UserRole,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let expiration = TimeDelta::try_hours(ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Token TTL of {ttl_hours} hours is out of range")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(secret: &str, token: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        decode_token(&state.jwt_secret, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_decodes_to_same_user() {
        let id = Uuid::new_v4();
        let token = issue_token(SECRET, id, UserRole::Artist, 1).unwrap();
        let user = decode_token(SECRET, &token).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.role, UserRole::Artist);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token("other", Uuid::new_v4(), UserRole::Admin, 1).unwrap();
        let err = decode_token(SECRET, &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn out_of_range_ttl_is_an_error() {
        let err = issue_token(SECRET, Uuid::new_v4(), UserRole::Buyer, i64::MAX).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn role_guards() {
        let buyer = AuthUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Buyer,
        };
        assert!(ensure_buyer(&buyer).is_ok());
        assert!(matches!(ensure_admin(&buyer), Err(AppError::Forbidden(_))));
        assert!(matches!(ensure_artist(&buyer), Err(AppError::Forbidden(_))));
        assert!(!buyer.is_admin());
    }
}
