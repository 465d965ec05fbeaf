use super::DomainError;
use crate::entity::sea_orm_active_enums::{
    ArtistStatus, ArtworkStatus, PaymentStatus, ShippingStatus,
};

pub fn ensure_purchasable(artwork: ArtworkStatus, artist: ArtistStatus) -> Result<(), DomainError> {
    if artwork != ArtworkStatus::Available {
        return Err(DomainError::ArtworkUnavailable);
    }
    if artist != ArtistStatus::Approved {
        return Err(DomainError::ArtistNotApproved);
    }
    Ok(())
}

pub fn can_ship(payment: PaymentStatus, shipping: ShippingStatus) -> bool {
    payment == PaymentStatus::Completed && shipping == ShippingStatus::Pending
}

pub fn can_deliver(payment: PaymentStatus, shipping: ShippingStatus) -> bool {
    payment == PaymentStatus::Completed && shipping == ShippingStatus::Shipped
}

pub fn ensure_shippable(payment: PaymentStatus, shipping: ShippingStatus) -> Result<(), DomainError> {
    if can_ship(payment, shipping) {
        Ok(())
    } else {
        Err(DomainError::NotShippable)
    }
}

pub fn ensure_deliverable(
    payment: PaymentStatus,
    shipping: ShippingStatus,
) -> Result<(), DomainError> {
    if can_deliver(payment, shipping) {
        Ok(())
    } else {
        Err(DomainError::NotDeliverable)
    }
}
