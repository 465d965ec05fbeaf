//! Outbound notifications. Delivery channels are not wired up yet, so each
//! notice is only written to the log.

use uuid::Uuid;

pub fn order_confirmation(buyer_id: Uuid, order_id: Uuid) {
    tracing::info!(%buyer_id, %order_id, "notify buyer: order confirmed");
}

pub fn artist_new_order(artist_id: Uuid, order_id: Uuid, earnings: i64) {
    tracing::info!(%artist_id, %order_id, earnings, "notify artist: new order");
}

pub fn order_shipped(buyer_id: Uuid, order_id: Uuid, tracking_number: &str) {
    tracing::info!(%buyer_id, %order_id, tracking_number, "notify buyer: order shipped");
}

pub fn order_delivered(buyer_id: Uuid, order_id: Uuid) {
    tracing::info!(%buyer_id, %order_id, "notify buyer: order delivered");
}

pub fn payout_scheduled(artist_id: Uuid, order_id: Uuid, net_amount: i64) {
    tracing::info!(%artist_id, %order_id, net_amount, "notify artist: payout scheduled");
}

pub fn artist_approved(user_id: Uuid) {
    tracing::info!(%user_id, "notify artist: application approved");
}

pub fn artist_rejected(user_id: Uuid, reason: &str) {
    tracing::info!(%user_id, reason, "notify artist: application rejected");
}
