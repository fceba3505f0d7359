//! Order status lifecycle and order-number generation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ORDER_STATUS_PENDING: &str = "PENDING";
pub const ORDER_STATUS_PROCESSING: &str = "PROCESSING";
pub const ORDER_STATUS_COMPLETED: &str = "COMPLETED";
pub const ORDER_STATUS_FAILED: &str = "FAILED";
pub const ORDER_STATUS_CANCELLED: &str = "CANCELLED";

/// Default ISO currency for new orders.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Number of random characters at the end of an order number.
pub const ORDER_NUMBER_SUFFIX_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => ORDER_STATUS_PENDING,
            OrderStatus::Processing => ORDER_STATUS_PROCESSING,
            OrderStatus::Completed => ORDER_STATUS_COMPLETED,
            OrderStatus::Failed => ORDER_STATUS_FAILED,
            OrderStatus::Cancelled => ORDER_STATUS_CANCELLED,
        }
    }

    /// Only orders still awaiting payment can be confirmed.
    pub fn is_confirmable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ORDER_STATUS_PENDING => Ok(OrderStatus::Pending),
            ORDER_STATUS_PROCESSING => Ok(OrderStatus::Processing),
            ORDER_STATUS_COMPLETED => Ok(OrderStatus::Completed),
            ORDER_STATUS_FAILED => Ok(OrderStatus::Failed),
            ORDER_STATUS_CANCELLED => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown order status '{other}'"
            ))),
        }
    }
}

/// Reject confirmation of an order that is no longer awaiting payment.
pub fn ensure_confirmable(status: &str) -> Result<(), CoreError> {
    let status: OrderStatus = status.parse()?;
    if !status.is_confirmable() {
        return Err(CoreError::Conflict(format!(
            "Order is {status} and cannot be confirmed"
        )));
    }
    Ok(())
}

/// Generate an order number such as `ORD-20240101-7K2QXM`.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(ORDER_NUMBER_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!(
        "{ORDER_NUMBER_PREFIX}-{}-{suffix}",
        now.format("%Y%m%d")
    )
}
