use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::rules;
use crate::{
    entity::sea_orm_active_enums::PaymentMethod,
    models::{Artwork, Order, Transaction},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    pub artwork_id: Uuid,
    pub payment_method: PaymentMethod,
    #[validate(length(min = 1, max = 255, message = "Buyer name is required (max 255 characters)"))]
    pub buyer_name: String,
    #[validate(
        length(max = 20, message = "Phone must not exceed 20 characters"),
        custom(function = "rules::saudi_phone")
    )]
    pub buyer_phone: String,
    #[validate(length(min = 1, max = 1000, message = "Shipping address is required (max 1000 characters)"))]
    pub shipping_address: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ShipOrderRequest {
    #[validate(length(min = 1, max = 255, message = "Tracking number is required (max 255 characters)"))]
    pub tracking_number: String,
}

/// An order with its artwork and, on detail views, its settlement record.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub artwork: Option<Artwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    pub can_ship: bool,
    pub can_deliver: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_phone_must_be_saudi() {
        let mut req = CreateOrderRequest {
            artwork_id: Uuid::new_v4(),
            payment_method: PaymentMethod::Mada,
            buyer_name: "Sara".into(),
            buyer_phone: "0551234567".into(),
            shipping_address: "King Fahd Rd, Riyadh".into(),
        };
        assert!(req.validate().is_ok());

        req.buyer_phone = "12345".into();
        assert!(req.validate().unwrap_err().field_errors().contains_key("buyer_phone"));
    }

    #[test]
    fn payment_method_parses_snake_case() {
        let body = serde_json::json!({
            "artwork_id": Uuid::new_v4(),
            "payment_method": "apple_pay",
            "buyer_name": "Sara",
            "buyer_phone": "+966551234567",
            "shipping_address": "Jeddah"
        });
        let req: CreateOrderRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.payment_method, PaymentMethod::ApplePay);

        let bad = serde_json::json!({
            "artwork_id": Uuid::new_v4(),
            "payment_method": "cash",
            "buyer_name": "Sara",
            "buyer_phone": "+966551234567",
            "shipping_address": "Jeddah"
        });
        assert!(serde_json::from_value::<CreateOrderRequest>(bad).is_err());
    }
}
