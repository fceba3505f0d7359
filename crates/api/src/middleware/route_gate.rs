//! Page gate for the signed-in areas of the frontend.
//!
//! Requests for `/dashboard`, `/admin` and `/upload` (and anything beneath
//! them) must carry an identity provider session cookie. Anonymous visitors
//! are sent to the sign-in page with the original path in `redirect`.
//! The gate only checks for the cookie; API handlers verify the token.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::session::has_session_cookie;

/// Path prefixes that require a session cookie.
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/admin", "/upload"];

/// Sign-in page anonymous visitors are redirected to.
pub const SIGNIN_PATH: &str = "/auth/signin";

/// Whether `path` is a protected prefix or lies beneath one.
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Sign-in URL that returns the visitor to `path` afterwards.
pub fn signin_url(path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", path)
        .finish();
    format!("{SIGNIN_PATH}?{query}")
}

/// Axum middleware: redirect (307) anonymous requests for protected pages.
pub async fn gate_protected_pages(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if is_protected_path(path) && !has_session_cookie(req.headers()) {
        let target = signin_url(path);
        tracing::debug!(path, "Redirecting anonymous visitor to sign-in");
        return Redirect::temporary(&target).into_response();
    }
    next.run(req).await
}
