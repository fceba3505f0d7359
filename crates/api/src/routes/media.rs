//! Route definitions for the `/media` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET  /        -> list_media (public catalog)
/// POST /        -> create_media (contributor or admin)
/// GET  /{id}    -> get_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::create_media))
        .route("/{id}", get(media::get_media))
}
