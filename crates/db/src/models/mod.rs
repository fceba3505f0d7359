//! Row models and DTOs.
//!
//! Entity structs derive `FromRow` and serialize with camelCase keys, which is
//! the wire format of the public API. Create DTOs carry already-validated
//! values into repositories.

pub mod dashboard;
pub mod license;
pub mod media_asset;
pub mod order;
pub mod payout;
pub mod user;
