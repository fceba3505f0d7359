//! Route definitions for the `/licenses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::licenses;
use crate::state::AppState;

/// Routes mounted at `/licenses`.
///
/// ```text
/// GET /         -> list_licenses
/// GET /quote    -> quote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(licenses::list_licenses))
        .route("/quote", get(licenses::quote))
}
