//! Route definitions for the `/checkout` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkout;
use crate::state::AppState;

/// Routes mounted at `/checkout`.
///
/// ```text
/// POST /create   -> create_order
/// POST /confirm  -> confirm_order
/// PUT  /confirm  -> payment_webhook (gateway notification)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(checkout::create_order))
        .route(
            "/confirm",
            post(checkout::confirm_order).put(checkout::payment_webhook),
        )
}
