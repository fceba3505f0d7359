//! Handlers for `/auth/user`: linking identity provider accounts to local users.
//!
//! The frontend calls these right after sign-up and sign-in, before a local
//! session user exists, so neither endpoint requires authentication. New
//! accounts may pick the customer or contributor role; only an admin session
//! can create another admin.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::error::CoreError;
use stockmedia_core::roles::UserRole;
use stockmedia_core::validation::{require_non_empty, validate_email};
use stockmedia_db::models::user::{CreateUser, User};
use stockmedia_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /auth/user`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLookupParams {
    pub email: Option<String>,
    pub supabase_id: Option<String>,
}

/// Request body for `POST /auth/user`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: Option<String>,
    pub supabase_id: String,
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UserWithMessage {
    pub user: User,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/auth/user?email=&supabaseId=
///
/// Find a user by email or identity provider id. Email matches win.
pub async fn get_user(
    State(state): State<AppState>,
    Query(params): Query<UserLookupParams>,
) -> AppResult<Json<UserResponse>> {
    let email = non_blank(params.email.as_deref());
    let supabase_id = non_blank(params.supabase_id.as_deref());

    if email.is_none() && supabase_id.is_none() {
        return Err(AppError::BadRequest("Email or Supabase ID required".into()));
    }

    let user = UserRepo::find_by_email_or_supabase_id(&state.pool, email, supabase_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse { user }))
}

/// POST /api/auth/user
///
/// Create the local user for an identity provider account, or return the
/// existing one when the email or provider id is already known.
pub async fn create_user(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<Json<UserWithMessage>> {
    let email = input.email.trim();
    validate_email(email)?;
    require_non_empty("supabaseId", &input.supabase_id)?;

    let role = input.role.unwrap_or_default();
    let granted_by_admin = session.as_ref().is_some_and(|u| u.role == UserRole::Admin);
    if role == UserRole::Admin && !granted_by_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin accounts can only be created by an admin".into(),
        )));
    }

    if let Some(user) =
        UserRepo::find_by_email_or_supabase_id(&state.pool, Some(email), Some(&input.supabase_id))
            .await?
    {
        return Ok(Json(UserWithMessage {
            user,
            message: "User already exists",
        }));
    }

    let dto = CreateUser {
        email: email.to_string(),
        name: input.name.filter(|n| !n.trim().is_empty()),
        supabase_id: input.supabase_id,
        role: role.as_str().to_string(),
    };
    let user = UserRepo::create(&state.pool, &dto).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");

    Ok(Json(UserWithMessage {
        user,
        message: "User created successfully",
    }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
