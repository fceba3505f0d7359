//! Handlers for the `/checkout` resource: order creation, payment
//! confirmation, and gateway webhooks.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::error::CoreError;
use stockmedia_core::media::LicenseType;
use stockmedia_core::orders::{ensure_confirmable, generate_order_number, DEFAULT_CURRENCY};
use stockmedia_core::payments::{
    verify_webhook_signature, OpaqueData, SettlementRequest, WebhookNotification,
    EVENT_AUTH_CAPTURE_CREATED, WEBHOOK_SIGNATURE_HEADER,
};
use stockmedia_core::pricing::{order_total, price_line};
use stockmedia_core::types::{Cents, DbId};
use stockmedia_core::validation::validate_email;
use stockmedia_db::models::media_asset::MediaAsset;
use stockmedia_db::models::order::{CompleteOrder, CreateOrder, CreateOrderItem, OrderWithItems};
use stockmedia_db::repositories::{MediaAssetRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuth;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One line of `POST /checkout/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub media_asset_id: DbId,
    pub quantity: i32,
    pub license_type: Option<LicenseType>,
}

/// Request body for `POST /checkout/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<CheckoutItem>,
    pub customer_email: String,
    pub customer_name: Option<String>,
}

/// Request body for `POST /checkout/confirm`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderRequest {
    pub order_id: DbId,
    /// Client-reported reference; recorded only by a live gateway.
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
    pub opaque_data: Option<OpaqueData>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: OrderWithItems,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/checkout/create
///
/// Price the requested items from the catalog and create a pending order.
/// The order and its items are written in one transaction.
pub async fn create_order(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    if input.items.is_empty() {
        return Err(AppError::BadRequest(
            "Order must contain at least one item".into(),
        ));
    }
    let customer_email = input.customer_email.trim().to_string();
    validate_email(&customer_email)?;

    let mut ids: Vec<DbId> = input.items.iter().map(|i| i.media_asset_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let assets = MediaAssetRepo::find_listed_by_ids(&state.pool, &ids).await?;

    let (items, total_amount) = price_items(&input.items, &assets)?;

    let order_input = CreateOrder {
        order_number: generate_order_number(chrono::Utc::now()),
        customer_email,
        customer_name: input.customer_name.filter(|n| !n.trim().is_empty()),
        total_amount,
        currency: DEFAULT_CURRENCY.to_string(),
        user_id: user.map(|u| u.user_id),
    };

    let (order, items) = OrderRepo::create_with_items(&state.pool, &order_input, &items).await?;
    let items = OrderRepo::attach_assets(&state.pool, items).await?;

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        total_amount = order.total_amount,
        item_count = items.len(),
        "Order created",
    );

    Ok(Json(OrderResponse {
        order: OrderWithItems { order, items },
        message: "Order created successfully",
    }))
}

/// POST /api/checkout/confirm
///
/// Settle a pending order through the payment gateway and mark it completed.
pub async fn confirm_order(
    State(state): State<AppState>,
    Json(input): Json<ConfirmOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = OrderRepo::find_by_id(&state.pool, input.order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: input.order_id,
        }))?;
    ensure_confirmable(&order.status)?;

    let settlement = state
        .gateway
        .settle(&SettlementRequest {
            order_id: order.id,
            order_number: order.order_number.clone(),
            amount: order.total_amount,
            currency: order.currency.clone(),
            opaque_data: input.opaque_data,
            client_transaction_id: input.transaction_id,
        })
        .await?;

    let completion = CompleteOrder {
        transaction_id: settlement.transaction_id,
        payment_method: input.payment_method,
    };
    // A concurrent confirmation may have won between the read and the update.
    OrderRepo::complete(&state.pool, order.id, &completion)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Order is no longer awaiting payment".into(),
            ))
        })?;

    let order = OrderRepo::find_with_items(&state.pool, order.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order.id,
        }))?;

    tracing::info!(
        order_id = order.order.id,
        gateway = state.gateway.name(),
        transaction_id = ?order.order.transaction_id,
        "Order confirmed",
    );

    Ok(Json(OrderResponse {
        order,
        message: "Order confirmed successfully",
    }))
}

/// PUT /api/checkout/confirm
///
/// Payment gateway webhook. When a signature key is configured the
/// `X-ANET-Signature` header must carry a valid HMAC of the raw body.
/// A captured payment completes the pending order whose number matches the
/// invoice number.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    if let Some(key) = &state.config.payments.signature_key {
        let header = headers
            .get(WEBHOOK_SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing webhook signature".into(),
                ))
            })?;
        verify_webhook_signature(key, header, &body)?;
    }

    let notification: WebhookNotification = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook body: {e}")))?;

    tracing::info!(
        event_type = %notification.event_type,
        transaction_id = ?notification.payload.id,
        invoice_number = ?notification.payload.invoice_number,
        "Payment webhook received",
    );

    if notification.event_type == EVENT_AUTH_CAPTURE_CREATED {
        apply_captured_payment(&state, &notification).await?;
    }

    Ok(Json(MessageResponse {
        message: "Webhook processed",
    }))
}

/// Complete the order referenced by a captured-payment notification.
///
/// Unknown or already-settled orders, and captures whose amount differs from
/// the order total, are logged and acknowledged without completing anything.
async fn apply_captured_payment(
    state: &AppState,
    notification: &WebhookNotification,
) -> AppResult<()> {
    let Some(order_number) = notification.payload.invoice_number.as_deref() else {
        tracing::warn!("Captured payment without invoice number");
        return Ok(());
    };

    let Some(order) = OrderRepo::find_by_order_number(&state.pool, order_number).await? else {
        tracing::warn!(order_number, "Captured payment for unknown order");
        return Ok(());
    };

    if ensure_confirmable(&order.status).is_err() {
        tracing::debug!(order_id = order.id, status = %order.status, "Order already settled");
        return Ok(());
    }

    let captured = notification.payload.auth_amount_cents();
    if captured != Some(order.total_amount) {
        tracing::warn!(
            order_id = order.id,
            expected = order.total_amount,
            captured = ?captured,
            "Captured amount does not match order total; order left open",
        );
        return Ok(());
    }

    let Some(transaction_id) = notification.payload.id.clone() else {
        tracing::warn!(order_id = order.id, "Captured payment without transaction id");
        return Ok(());
    };

    let completion = CompleteOrder {
        transaction_id,
        payment_method: None,
    };
    if OrderRepo::complete(&state.pool, order.id, &completion)
        .await?
        .is_some()
    {
        tracing::info!(order_id = order.id, "Order completed by webhook");
    }
    Ok(())
}

/// Price each requested line against the listed catalog.
///
/// Returns the order items and the order total. A line whose asset is not
/// listed fails the whole order.
fn price_items(
    requested: &[CheckoutItem],
    listed: &[MediaAsset],
) -> Result<(Vec<CreateOrderItem>, Cents), AppError> {
    let by_id: HashMap<DbId, &MediaAsset> = listed.iter().map(|a| (a.id, a)).collect();

    let mut items = Vec::with_capacity(requested.len());
    let mut lines = Vec::with_capacity(requested.len());
    for item in requested {
        let asset = by_id.get(&item.media_asset_id).ok_or_else(|| {
            AppError::NotFound(format!("Media asset {} not found", item.media_asset_id))
        })?;

        let license = item.license_type.unwrap_or_default();
        let line = price_line(license.apply(asset.price)?, item.quantity)?;
        lines.push(line);
        items.push(CreateOrderItem {
            media_asset_id: asset.id,
            license_type: license.as_str().to_string(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
        });
    }

    let total = order_total(&lines)?;
    Ok((items, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn asset(id: DbId, price: Cents) -> MediaAsset {
        let now = Utc::now();
        MediaAsset {
            id,
            title: format!("Asset {id}"),
            description: None,
            media_type: "IMAGE".into(),
            tags: vec![],
            category: None,
            cloudinary_id: format!("asset-{id}"),
            original_url: String::new(),
            thumbnail_url: String::new(),
            preview_url: String::new(),
            watermarked_url: None,
            width: None,
            height: None,
            duration: None,
            file_size: None,
            format: None,
            price,
            license_type: "STANDARD".into(),
            is_active: true,
            is_approved: true,
            user_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn line(id: DbId, quantity: i32, license: Option<LicenseType>) -> CheckoutItem {
        CheckoutItem {
            media_asset_id: id,
            quantity,
            license_type: license,
        }
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let listed = [asset(1, 2500), asset(2, 3000)];
        let (items, total) = price_items(&[line(1, 2, None), line(2, 1, None)], &listed).unwrap();
        assert_eq!(items[0].total_price, 5000);
        assert_eq!(items[1].total_price, 3000);
        assert_eq!(total, 8000);
    }

    #[test]
    fn license_multiplies_unit_price() {
        let listed = [asset(1, 2500)];
        let (items, total) =
            price_items(&[line(1, 1, Some(LicenseType::Premium))], &listed).unwrap();
        assert_eq!(items[0].unit_price, 7500);
        assert_eq!(items[0].license_type, "PREMIUM");
        assert_eq!(total, 7500);
    }

    #[test]
    fn unlisted_asset_is_not_found() {
        let err = price_items(&[line(9, 1, None)], &[asset(1, 100)]).unwrap_err();
        assert_matches!(err, AppError::NotFound(msg) if msg == "Media asset 9 not found");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = price_items(&[line(1, 0, None)], &[asset(1, 100)]).unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }
}
