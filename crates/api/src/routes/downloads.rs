//! Route definitions for the `/downloads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::downloads;
use crate::state::AppState;

/// Routes mounted at `/downloads`.
///
/// ```text
/// POST /sign      -> sign_download
/// GET  /{token}   -> redeem_download (307 to the CDN)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign", post(downloads::sign_download))
        .route("/{token}", get(downloads::redeem_download))
}
