//! Route definitions for the `/cloudinary` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/cloudinary`.
///
/// ```text
/// POST /sign    -> sign (contributor or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/sign", post(uploads::sign))
}
