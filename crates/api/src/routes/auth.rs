//! Route definitions for the `/auth` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /user    -> get_user (by ?email= or ?supabaseId=)
/// POST /user    -> create_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/user", get(users::get_user).post(users::create_user))
}
