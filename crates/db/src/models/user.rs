//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stockmedia_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    /// One of `ADMIN`, `CONTRIBUTOR`, `CUSTOMER`.
    pub role: String,
    /// Subject id assigned by the identity provider.
    pub supabase_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
    pub supabase_id: String,
    pub role: String,
}
