use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        artist_review::{can_reapply, estimated_review_date},
        commission::DEFAULT_COMMISSION_RATE,
    },
    dto::artists::{ArtistRegisterRequest, ArtistRegistrationResponse, ArtistStatusView},
    entity::{
        ArtistSamples, Artists,
        artist_samples::{ActiveModel as SampleActive, Column as SampleCol},
        artists::{ActiveModel as ArtistActive, Column as ArtistCol, Model as ArtistModel},
        sea_orm_active_enums::{ArtistStatus, SubscriptionTier, UserRole},
        users::ActiveModel as UserActive,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_artist, issue_token},
    models::{ArtistProfile, ArtistSample, User},
    response::ApiResponse,
    services::auth_service::{email_conflict, ensure_email_free, hash_password},
    state::AppState,
};

/// Create the artist account, a pending profile and its samples in one transaction.
pub async fn register_artist(
    state: &AppState,
    payload: ArtistRegisterRequest,
) -> AppResult<ApiResponse<ArtistRegistrationResponse>> {
    let email = payload.email.trim().to_lowercase();
    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;
    ensure_email_free(&txn, &email).await?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(UserRole::Artist),
        email_verified: Set(false),
        avatar_url: Set(None),
        created_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(email_conflict)?;

    let artist = ArtistActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        status: Set(ArtistStatus::Pending),
        bio: Set(Some(payload.bio)),
        phone: Set(Some(payload.phone)),
        city: Set(Some(payload.city)),
        subscription_tier: Set(SubscriptionTier::Basic),
        commission_rate: Set(DEFAULT_COMMISSION_RATE),
        total_sales: Set(0),
        verified: Set(false),
        featured: Set(false),
        rejection_reason: Set(None),
        can_reapply_at: Set(None),
        notes_admin: Set(None),
        approved_by: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut samples = Vec::with_capacity(payload.samples.len());
    for sample in payload.samples {
        let saved = SampleActive {
            id: Set(Uuid::new_v4()),
            artist_id: Set(artist.id),
            title: Set(sample.title),
            description: Set(sample.description),
            image_url: Set(sample.image_url),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        samples.push(ArtistSample::from(saved));
    }

    txn.commit().await?;

    tracing::info!(artist_id = %artist.id, user_id = %user.id, "artist application submitted");
    audit::record(
        &state.pool,
        user.id,
        "artist_register",
        "artists",
        serde_json::json!({ "artist_id": artist.id, "samples": samples.len() }),
    )
    .await;

    let access_token = issue_token(&state.jwt_secret, user.id, user.role, state.token_ttl_hours)?;
    let submitted_at = artist.created_at.with_timezone(&Utc);
    let data = ArtistRegistrationResponse {
        user: User::from(user),
        artist: ArtistProfile::from(artist),
        samples,
        access_token,
        token_type: "Bearer".into(),
        estimated_review_date: estimated_review_date(submitted_at),
    };
    Ok(ApiResponse::success(
        "Artist application submitted for review",
        data,
        None,
    ))
}

pub async fn find_profile(state: &AppState, user_id: Uuid) -> AppResult<ArtistModel> {
    Artists::find()
        .filter(ArtistCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Artist profile"))
}

pub async fn application_status(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ArtistStatusView>> {
    ensure_artist(user)?;
    let artist = find_profile(state, user.user_id).await?;

    let view = match artist.status {
        ArtistStatus::Pending => {
            let samples_count = ArtistSamples::find()
                .filter(SampleCol::ArtistId.eq(artist.id))
                .count(&state.orm)
                .await?;
            let submitted_at = artist.created_at.with_timezone(&Utc);
            ArtistStatusView::Pending {
                submitted_at,
                samples_count,
                estimated_review_date: estimated_review_date(submitted_at),
            }
        }
        ArtistStatus::Approved => ArtistStatusView::Approved {
            commission_rate: artist.commission_rate,
            subscription_tier: artist.subscription_tier,
            total_sales: artist.total_sales,
            verified: artist.verified,
            featured: artist.featured,
            approved_at: artist.updated_at.with_timezone(&Utc),
        },
        ArtistStatus::Rejected => {
            let can_reapply_at = artist.can_reapply_at.map(|at| at.with_timezone(&Utc));
            ArtistStatusView::Rejected {
                rejection_reason: artist.rejection_reason,
                can_reapply_at,
                can_reapply_now: can_reapply(can_reapply_at, Utc::now()),
            }
        }
    };

    Ok(ApiResponse::success("Artist status", view, None))
}

/// Profile of the calling artist, refused unless the application was approved.
pub async fn approved_artist(state: &AppState, user: &AuthUser) -> AppResult<ArtistModel> {
    ensure_artist(user)?;
    let artist = find_profile(state, user.user_id).await?;
    match artist.status {
        ArtistStatus::Approved => Ok(artist),
        ArtistStatus::Pending => Err(AppError::Forbidden(
            "Your artist application is still under review".into(),
        )),
        ArtistStatus::Rejected => {
            let mut message = String::from("Your artist application was rejected");
            if let Some(reason) = artist.rejection_reason.as_deref() {
                message.push_str(": ");
                message.push_str(reason);
            }
            if let Some(at) = artist.can_reapply_at {
                message.push_str(&format!(". You may reapply after {}", at.to_rfc3339()));
            }
            Err(AppError::Forbidden(message))
        }
    }
}

pub async fn samples_of(state: &AppState, artist_id: Uuid) -> AppResult<Vec<ArtistSample>> {
    let samples = ArtistSamples::find()
        .filter(SampleCol::ArtistId.eq(artist_id))
        .order_by_asc(SampleCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ArtistSample::from)
        .collect();
    Ok(samples)
}
