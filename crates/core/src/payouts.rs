//! Contributor payout statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;

pub const PAYOUT_STATUS_PENDING: &str = "PENDING";
pub const PAYOUT_STATUS_PROCESSING: &str = "PROCESSING";
pub const PAYOUT_STATUS_COMPLETED: &str = "COMPLETED";
pub const PAYOUT_STATUS_FAILED: &str = "FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PayoutStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayoutStatus::Pending => PAYOUT_STATUS_PENDING,
            PayoutStatus::Processing => PAYOUT_STATUS_PROCESSING,
            PayoutStatus::Completed => PAYOUT_STATUS_COMPLETED,
            PayoutStatus::Failed => PAYOUT_STATUS_FAILED,
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PAYOUT_STATUS_PENDING => Ok(PayoutStatus::Pending),
            PAYOUT_STATUS_PROCESSING => Ok(PayoutStatus::Processing),
            PAYOUT_STATUS_COMPLETED => Ok(PayoutStatus::Completed),
            PAYOUT_STATUS_FAILED => Ok(PayoutStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown payout status '{other}'"
            ))),
        }
    }
}

/// Payouts must move a positive amount.
pub fn validate_payout_amount(amount: Cents) -> Result<(), CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(
            "Payout amount must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Only open payouts can be marked completed.
pub fn ensure_completable(status: &str) -> Result<(), CoreError> {
    match status.parse::<PayoutStatus>()? {
        PayoutStatus::Pending | PayoutStatus::Processing => Ok(()),
        other => Err(CoreError::Conflict(format!(
            "Payout is {other} and cannot be completed"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_positive() {
        assert!(validate_payout_amount(1).is_ok());
        assert!(validate_payout_amount(0).is_err());
        assert!(validate_payout_amount(-50).is_err());
    }

    #[test]
    fn completable_statuses() {
        assert!(ensure_completable("PENDING").is_ok());
        assert!(ensure_completable("PROCESSING").is_ok());
        assert!(matches!(
            ensure_completable("COMPLETED"),
            Err(CoreError::Conflict(_))
        ));
        assert!(matches!(
            ensure_completable("FAILED"),
            Err(CoreError::Conflict(_))
        ));
    }
}
