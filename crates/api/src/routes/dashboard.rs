//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`. All require a session.
///
/// ```text
/// GET /            -> summary
/// GET /uploads     -> uploads
/// GET /purchases   -> purchases
/// GET /payouts     -> payouts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::summary))
        .route("/uploads", get(dashboard::uploads))
        .route("/purchases", get(dashboard::purchases))
        .route("/payouts", get(dashboard::payouts))
}
