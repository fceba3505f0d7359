//! Order and order item models.

use serde::Serialize;
use sqlx::FromRow;
use stockmedia_core::types::{Cents, DbId, Timestamp};

use super::media_asset::MediaAsset;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub status: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub total_amount: Cents,
    pub currency: String,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub media_asset_id: DbId,
    pub license_type: String,
    pub quantity: i32,
    pub unit_price: Cents,
    pub total_price: Cents,
}

/// Order item with its purchased asset embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemWithAsset {
    #[serde(flatten)]
    pub item: OrderItem,
    pub media_asset: MediaAsset,
}

/// Order with its items, as checkout endpoints return it.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemWithAsset>,
}

/// DTO for a new order header.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub order_number: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub total_amount: Cents,
    pub currency: String,
    pub user_id: Option<DbId>,
}

/// DTO for a priced order line.
#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub media_asset_id: DbId,
    pub license_type: String,
    pub quantity: i32,
    pub unit_price: Cents,
    pub total_price: Cents,
}

/// Payment details recorded when an order completes.
#[derive(Debug, Clone)]
pub struct CompleteOrder {
    pub transaction_id: String,
    pub payment_method: Option<String>,
}
