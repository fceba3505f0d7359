//! Account roles.
//!
//! Role names are stored verbatim in `users.role` and must match the CHECK
//! constraint in `20260101000001_create_users_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_CONTRIBUTOR: &str = "CONTRIBUTOR";
pub const ROLE_CUSTOMER: &str = "CUSTOMER";

/// Role attached to every user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Contributor,
    #[default]
    Customer,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Contributor => ROLE_CONTRIBUTOR,
            UserRole::Customer => ROLE_CUSTOMER,
        }
    }

    /// Contributors and admins may upload media.
    pub fn can_upload(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Contributor)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_CONTRIBUTOR => Ok(UserRole::Contributor),
            ROLE_CUSTOMER => Ok(UserRole::Customer),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(
            "CONTRIBUTOR".parse::<UserRole>().unwrap(),
            UserRole::Contributor
        );
        assert_eq!("CUSTOMER".parse::<UserRole>().unwrap(), UserRole::Customer);
    }

    #[test]
    fn rejects_lowercase_role() {
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn only_contributors_and_admins_upload() {
        assert!(UserRole::Admin.can_upload());
        assert!(UserRole::Contributor.can_upload());
        assert!(!UserRole::Customer.can_upload());
    }

    #[test]
    fn default_role_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
    }
}
