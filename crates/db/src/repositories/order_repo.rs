//! Repository for the `orders` and `order_items` tables.

use std::collections::HashMap;

use sqlx::PgPool;
use stockmedia_core::orders::ORDER_STATUS_COMPLETED;
use stockmedia_core::types::DbId;

use crate::models::order::{
    CompleteOrder, CreateOrder, CreateOrderItem, Order, OrderItem, OrderItemWithAsset,
    OrderWithItems,
};
use crate::repositories::MediaAssetRepo;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

const COLUMNS: &str = "\
    id, order_number, status, customer_email, customer_name, total_amount, currency, \
    transaction_id, payment_method, user_id, created_at, updated_at, completed_at";

const ITEM_COLUMNS: &str = "\
    id, order_id, media_asset_id, license_type, quantity, unit_price, total_price";

/// Provides order creation, lookup and completion.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and all of its items in a single transaction.
    pub async fn create_with_items(
        pool: &PgPool,
        input: &CreateOrder,
        items: &[CreateOrderItem],
    ) -> Result<(Order, Vec<OrderItem>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO orders \
                (order_number, customer_email, customer_name, total_amount, currency, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(&input.order_number)
            .bind(&input.customer_email)
            .bind(&input.customer_name)
            .bind(input.total_amount)
            .bind(&input.currency)
            .bind(input.user_id)
            .fetch_one(&mut *tx)
            .await?;

        let item_query = format!(
            "INSERT INTO order_items \
                (order_id, media_asset_id, license_type, quantity, unit_price, total_price) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ITEM_COLUMNS}"
        );
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(&item_query)
                .bind(order.id)
                .bind(item.media_asset_id)
                .bind(&item.license_type)
                .bind(item.quantity)
                .bind(item.unit_price)
                .bind(item.total_price)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok((order, created))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_order_number(
        pool: &PgPool,
        order_number: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_number = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .fetch_optional(pool)
            .await
    }

    /// Items of an order in insertion order.
    pub async fn list_items(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query =
            format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Attach each item's media asset. Items whose asset row is gone are
    /// dropped.
    pub async fn attach_assets(
        pool: &PgPool,
        items: Vec<OrderItem>,
    ) -> Result<Vec<OrderItemWithAsset>, sqlx::Error> {
        let ids: Vec<DbId> = items.iter().map(|i| i.media_asset_id).collect();
        let assets: HashMap<DbId, _> = MediaAssetRepo::find_by_ids(pool, &ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let media_asset = assets.get(&item.media_asset_id)?.clone();
                Some(OrderItemWithAsset { item, media_asset })
            })
            .collect())
    }

    /// Load an order with its items and their assets.
    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let Some(order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::list_items(pool, order.id).await?;
        let items = Self::attach_assets(pool, items).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// Complete a pending or processing order.
    ///
    /// The status guard makes concurrent confirmations safe: only one caller
    /// gets the row back, everyone else gets `None`.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        input: &CompleteOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET \
                status = $2, \
                transaction_id = $3, \
                payment_method = COALESCE($4, payment_method), \
                completed_at = NOW() \
             WHERE id = $1 AND status IN ('PENDING', 'PROCESSING') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(ORDER_STATUS_COMPLETED)
            .bind(&input.transaction_id)
            .bind(&input.payment_method)
            .fetch_optional(pool)
            .await
    }

    /// Find a completed order that contains `media_asset_id`.
    pub async fn find_completed_with_asset(
        pool: &PgPool,
        order_id: DbId,
        media_asset_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders o \
             WHERE o.id = $1 AND o.status = $3 \
               AND EXISTS (SELECT 1 FROM order_items oi \
                           WHERE oi.order_id = o.id AND oi.media_asset_id = $2)"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(media_asset_id)
            .bind(ORDER_STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }

    /// Completed orders placed with `email`, newest first.
    pub async fn list_completed_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE customer_email = $1 AND status = $2 \
             ORDER BY completed_at DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(email)
            .bind(ORDER_STATUS_COMPLETED)
            .fetch_all(pool)
            .await
    }
}
