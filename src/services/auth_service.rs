use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
    ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{LoginRequest, LoginResponse, MeResponse, RegisterRequest},
    entity::{
        Artists, Users,
        artists::Column as ArtistCol,
        sea_orm_active_enums::UserRole,
        users::{ActiveModel as UserActive, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, issue_token},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const EMAIL_TAKEN: &str = "This email is already registered";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Map a unique violation on insert to the `email` field error.
pub fn email_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::field("email", EMAIL_TAKEN),
        _ => err.into(),
    }
}

pub async fn ensure_email_free<C: sea_orm::ConnectionTrait>(conn: &C, email: &str) -> AppResult<()> {
    let exist = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(conn)
        .await?;
    if exist.is_some() {
        return Err(AppError::field("email", EMAIL_TAKEN));
    }
    Ok(())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let email = payload.email.trim().to_lowercase();
    ensure_email_free(&state.orm, &email).await?;

    let password_hash = hash_password(&payload.password)?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(UserRole::Buyer),
        email_verified: Set(false),
        avatar_url: Set(payload.avatar_url),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(email_conflict)?;

    audit::record(
        &state.pool,
        user.id,
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let access_token = issue_token(&state.jwt_secret, user.id, user.role, state.token_ttl_hours)?;
    let resp = LoginResponse {
        access_token,
        token_type: "Bearer".into(),
        expires_in_hours: state.token_ttl_hours,
        user: User::from(user),
    };
    Ok(ApiResponse::success("User registered", resp, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let email = payload.email.trim().to_lowercase();
    let user = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let access_token = issue_token(&state.jwt_secret, user.id, user.role, state.token_ttl_hours)?;

    audit::record(
        &state.pool,
        user.id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let resp = LoginResponse {
        access_token,
        token_type: "Bearer".into(),
        expires_in_hours: state.token_ttl_hours,
        user: User::from(user),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<MeResponse>> {
    let account = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let artist = if account.role == UserRole::Artist {
        Artists::find()
            .filter(ArtistCol::UserId.eq(account.id))
            .one(&state.orm)
            .await?
            .map(Into::into)
    } else {
        None
    };

    let data = MeResponse {
        user: User::from(account),
        artist,
    };
    Ok(ApiResponse::success("Current user", data, None))
}
