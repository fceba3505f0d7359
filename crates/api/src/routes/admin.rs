//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the `ADMIN` role.
///
/// ```text
/// GET  /stats                   -> stats
/// GET  /approvals               -> approval_queue
/// POST /media/{id}/approve      -> approve_media
/// POST /media/{id}/reject       -> reject_media
/// GET  /users                   -> list_users
/// POST /payouts                 -> create_payout
/// POST /payouts/{id}/complete   -> complete_payout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/approvals", get(admin::approval_queue))
        .route("/media/{id}/approve", post(admin::approve_media))
        .route("/media/{id}/reject", post(admin::reject_media))
        .route("/users", get(admin::list_users))
        .route("/payouts", post(admin::create_payout))
        .route("/payouts/{id}/complete", post(admin::complete_payout))
}
