//! Session-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stockmedia_core::error::CoreError;
use stockmedia_core::roles::UserRole;
use stockmedia_core::types::DbId;
use stockmedia_db::repositories::UserRepo;

use crate::auth::session::{session_token, validate_session_token};
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user resolved from the identity provider session.
///
/// The access token is taken from `Authorization: Bearer <token>` or the
/// session cookie, verified with `SUPABASE_JWT_SECRET`, and its subject is
/// looked up in `users.supabase_id`.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Local database id.
    pub user_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    /// Identity provider subject.
    pub supabase_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        let secret = state.config.identity.jwt_secret.as_deref().ok_or_else(|| {
            tracing::warn!("SUPABASE_JWT_SECRET is not configured; rejecting session");
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        let claims = validate_session_token(&token, secret).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        let user = UserRepo::find_by_supabase_id(&state.pool, &claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("No account for this session".into()))
            })?;

        // Unknown role strings fall back to the least privileged role.
        let role = user.role.parse().unwrap_or_default();

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role,
            supabase_id: claims.sub,
        })
    }
}

/// Session user when one is present and valid, `None` otherwise.
///
/// Only authentication failures are swallowed; database errors still reject.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuth(Some(user))),
            Err(AppError::Core(CoreError::Unauthorized(_))) => Ok(OptionalAuth(None)),
            Err(err) => Err(err),
        }
    }
}
