//! Order arithmetic and contributor revenue share.
//!
//! All amounts are integer cents. Every operation is checked so a hostile
//! quantity cannot wrap a total into a small or negative number.

use crate::error::CoreError;
use crate::types::Cents;

/// Percentage of each sale credited to the asset's contributor.
pub const CONTRIBUTOR_SHARE_PERCENT: i64 = 60;

/// Largest quantity accepted for a single order line.
pub const MAX_LINE_QUANTITY: i32 = 1000;

/// A priced order line before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price: Cents,
    pub quantity: i32,
    pub total_price: Cents,
}

/// Price a single line: `unit_price x quantity`.
pub fn price_line(unit_price: Cents, quantity: i32) -> Result<PricedLine, CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(
            "Quantity must be at least 1".into(),
        ));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Quantity must not exceed {MAX_LINE_QUANTITY}"
        )));
    }
    if unit_price < 0 {
        return Err(CoreError::Validation("Unit price must not be negative".into()));
    }
    let total_price = unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| CoreError::Validation("Line total is out of range".into()))?;
    Ok(PricedLine {
        unit_price,
        quantity,
        total_price,
    })
}

/// Sum of all line totals.
pub fn order_total(lines: &[PricedLine]) -> Result<Cents, CoreError> {
    lines.iter().try_fold(0i64, |acc, line| {
        acc.checked_add(line.total_price)
            .ok_or_else(|| CoreError::Validation("Order total is out of range".into()))
    })
}

/// Contributor earnings for a sale amount, rounded down to the cent.
pub fn contributor_share(sale_amount: Cents) -> Cents {
    sale_amount.saturating_mul(CONTRIBUTOR_SHARE_PERCENT) / 100
}
