use chrono::{DateTime, Duration, Utc};

use super::{
    DomainError,
    commission::DEFAULT_COMMISSION_RATE,
};
use crate::entity::sea_orm_active_enums::ArtistStatus;

/// Days a rejected artist waits before `can_reapply_at`.
pub const REAPPLY_COOLDOWN_DAYS: i64 = 30;
/// Days after submission reported as the expected review date.
pub const REVIEW_ESTIMATE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub commission_rate: i32,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: String,
    pub can_reapply_at: DateTime<Utc>,
}

pub fn approve(
    current: ArtistStatus,
    commission_rate: Option<i32>,
    featured: Option<bool>,
) -> Result<Approval, DomainError> {
    if current != ArtistStatus::Pending {
        return Err(DomainError::ArtistNotPending);
    }
    Ok(Approval {
        commission_rate: commission_rate.unwrap_or(DEFAULT_COMMISSION_RATE),
        featured: featured.unwrap_or(false),
    })
}

pub fn reject(
    current: ArtistStatus,
    reason: String,
    now: DateTime<Utc>,
) -> Result<Rejection, DomainError> {
    if current != ArtistStatus::Pending {
        return Err(DomainError::ArtistNotPending);
    }
    Ok(Rejection {
        reason,
        can_reapply_at: now + Duration::days(REAPPLY_COOLDOWN_DAYS),
    })
}

pub fn can_reapply(can_reapply_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    can_reapply_at.is_some_and(|at| now >= at)
}

pub fn estimated_review_date(submitted_at: DateTime<Utc>) -> DateTime<Utc> {
    submitted_at + Duration::days(REVIEW_ESTIMATE_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap()
    }

    #[test]
    fn approve_defaults() {
        let approval = approve(ArtistStatus::Pending, None, None).unwrap();
        assert_eq!(approval.commission_rate, 25);
        assert!(!approval.featured);
    }

    #[test]
    fn approve_with_overrides() {
        let approval = approve(ArtistStatus::Pending, Some(40), Some(true)).unwrap();
        assert_eq!(approval, Approval { commission_rate: 40, featured: true });
    }

    #[test]
    fn only_pending_artists_can_be_reviewed() {
        for status in [ArtistStatus::Approved, ArtistStatus::Rejected] {
            assert_eq!(approve(status, None, None), Err(DomainError::ArtistNotPending));
            assert_eq!(
                reject(status, "blurry samples".into(), at(2025, 1, 1)),
                Err(DomainError::ArtistNotPending)
            );
        }
    }

    #[test]
    fn rejection_cooldown_is_thirty_days() {
        let now = at(2025, 11, 22);
        let rejection = reject(ArtistStatus::Pending, "incomplete".into(), now).unwrap();
        assert_eq!(rejection.can_reapply_at, now + Duration::days(30));
        assert_eq!(rejection.can_reapply_at, at(2025, 12, 22));
        assert_eq!(rejection.reason, "incomplete");
    }

    #[test]
    fn reapply_window() {
        let at_date = at(2025, 12, 22);
        assert!(!can_reapply(None, at_date));
        assert!(!can_reapply(Some(at_date), at(2025, 12, 21)));
        assert!(can_reapply(Some(at_date), at_date));
        assert!(can_reapply(Some(at_date), at(2026, 1, 1)));
    }
}
