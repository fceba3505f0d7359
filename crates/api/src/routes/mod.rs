pub mod admin;
pub mod auth;
pub mod checkout;
pub mod cloudinary;
pub mod dashboard;
pub mod debug;
pub mod downloads;
pub mod health;
pub mod licenses;
pub mod media;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/user                          lookup, link account (public)
///
/// /media                              catalog (public), create (contributor)
/// /media/{id}                         one listed asset (public)
///
/// /cloudinary/sign                    upload signature (contributor)
///
/// /checkout/create                    create order (optional session)
/// /checkout/confirm                   confirm (POST), gateway webhook (PUT)
///
/// /downloads/sign                     download link for a completed order
/// /downloads/{token}                  redirect to the CDN
///
/// /licenses                           license tiers
/// /licenses/quote                     price under a tier
///
/// /dashboard                          own summary (session)
/// /dashboard/uploads                  own assets
/// /dashboard/purchases                own completed orders
/// /dashboard/payouts                  own payouts
///
/// /admin/stats                        platform figures (admin only)
/// /admin/approvals                    approval queue
/// /admin/media/{id}/approve           approve
/// /admin/media/{id}/reject            reject (deactivates)
/// /admin/users                        recent users
/// /admin/payouts                      create payout
/// /admin/payouts/{id}/complete        mark payout completed
///
/// /debug/env                          credential presence (non-production)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account linking for the identity provider.
        .nest("/auth", auth::router())
        // Public catalog and contributor uploads.
        .nest("/media", media::router())
        .nest("/cloudinary", cloudinary::router())
        // Purchase flow.
        .nest("/checkout", checkout::router())
        .nest("/downloads", downloads::router())
        .nest("/licenses", licenses::router())
        // Signed-in areas.
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
        .nest("/debug", debug::router())
}
