//! Payment gateway seam and webhook signature verification.
//!
//! The browser tokenizes card data with the gateway's hosted script and sends
//! the resulting opaque data to the confirm endpoint. Settlement goes through
//! a [`PaymentGateway`] so a live gateway client can replace the
//! [`SimulatedGateway`] without touching handlers.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;

use crate::error::CoreError;
use crate::types::{Cents, DbId};

/// Transaction id recorded by [`SimulatedGateway`].
pub const SIMULATED_TRANSACTION_ID: &str = "SIMULATED-TXN-ID";

/// Header carrying the webhook HMAC (`sha512=<HEX>`).
pub const WEBHOOK_SIGNATURE_HEADER: &str = "x-anet-signature";

/// Webhook event emitted after an auth-and-capture transaction succeeds.
pub const EVENT_AUTH_CAPTURE_CREATED: &str = "net.authorize.payment.authcapture.created";

/// Opaque payment token produced by the gateway's browser script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueData {
    pub data_descriptor: String,
    pub data_value: String,
}

/// Everything a gateway needs to settle an order.
#[derive(Debug, Clone)]
pub struct SettlementRequest {
    pub order_id: DbId,
    pub order_number: String,
    pub amount: Cents,
    pub currency: String,
    pub opaque_data: Option<OpaqueData>,
    /// Reference the client claims to already hold; never trusted.
    pub client_transaction_id: Option<String>,
}

/// Result of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub transaction_id: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Settle the payment for an order.
    async fn settle(&self, request: &SettlementRequest) -> Result<Settlement, CoreError>;
}

/// Gateway stand-in that accepts any payment without contacting a processor.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedGateway;

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn settle(&self, request: &SettlementRequest) -> Result<Settlement, CoreError> {
        tracing::warn!(
            order_id = request.order_id,
            order_number = %request.order_number,
            amount = request.amount,
            has_opaque_data = request.opaque_data.is_some(),
            "Simulated settlement; no payment was verified",
        );
        Ok(Settlement {
            transaction_id: SIMULATED_TRANSACTION_ID.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

type HmacSha512 = Hmac<Sha512>;

/// Top-level webhook notification body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookNotification {
    pub event_type: String,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Gateway transaction id.
    pub id: Option<String>,
    /// Merchant invoice number; carries our order number.
    pub invoice_number: Option<String>,
    /// Captured amount in major currency units (e.g. `25.00`).
    pub auth_amount: Option<f64>,
}

impl WebhookPayload {
    /// Captured amount in cents, if present and representable.
    pub fn auth_amount_cents(&self) -> Option<Cents> {
        let cents = (self.auth_amount? * 100.0).round();
        (cents.is_finite() && cents >= 0.0 && cents <= Cents::MAX as f64).then(|| cents as Cents)
    }
}

/// Compute the uppercase hex HMAC-SHA512 of a webhook body.
pub fn compute_webhook_signature(signature_key: &str, body: &[u8]) -> String {
    let mut mac = HmacSha512::new_from_slice(signature_key.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Verify a `sha512=<HEX>` webhook signature header in constant time.
pub fn verify_webhook_signature(
    signature_key: &str,
    header_value: &str,
    body: &[u8],
) -> Result<(), CoreError> {
    let unauthorized = || CoreError::Unauthorized("Invalid webhook signature".into());

    let (scheme, hex_sig) = header_value.split_once('=').ok_or_else(unauthorized)?;
    if !scheme.trim().eq_ignore_ascii_case("sha512") {
        return Err(unauthorized());
    }
    let expected = hex::decode(hex_sig.trim()).map_err(|_| unauthorized())?;

    let mut mac = HmacSha512::new_from_slice(signature_key.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(&expected).map_err(|_| unauthorized())
}
