//! Business rules that do not touch the database.
//!
//! Services load rows, ask these functions whether a transition is allowed and
//! what the new values are, then persist the result.

pub mod artist_review;
pub mod catalog;
pub mod commission;
pub mod fulfillment;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Artist is not pending review")]
    ArtistNotPending,

    #[error("Artwork is not available for purchase")]
    ArtworkUnavailable,

    #[error("The artist of this artwork is not approved")]
    ArtistNotApproved,

    #[error("Order must be paid and awaiting shipment")]
    NotShippable,

    #[error("Order must be paid and shipped before delivery")]
    NotDeliverable,
}
