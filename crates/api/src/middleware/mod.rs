//! Authentication, authorization and page gating.
//!
//! - [`auth::AuthUser`] -- Resolves the identity provider session to a local user.
//! - [`auth::OptionalAuth`] -- Same, but yields `None` for anonymous callers.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireContributor`] -- Requires `CONTRIBUTOR` or `ADMIN`.
//! - [`rbac::RequireAuth`] -- Requires any signed-in user.
//! - [`route_gate::gate_protected_pages`] -- Redirects anonymous page visits to sign-in.

pub mod auth;
pub mod rbac;
pub mod route_gate;
