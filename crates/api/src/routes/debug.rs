//! Route definitions for the `/debug` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::debug;
use crate::state::AppState;

/// Routes mounted at `/debug`. Answers 404 when `APP_ENV=production`.
///
/// ```text
/// GET /env    -> env_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/env", get(debug::env_check))
}
