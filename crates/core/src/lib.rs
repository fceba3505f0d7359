//! Domain logic for the stock media marketplace.
//!
//! This crate performs no I/O. It holds the shared types, the error enum,
//! pricing and pagination arithmetic, CDN request signing, and the payment
//! gateway seam so that both the repository layer and the HTTP layer can use
//! them.

pub mod cdn;
pub mod error;
pub mod media;
pub mod orders;
pub mod pagination;
pub mod payments;
pub mod payouts;
pub mod pricing;
pub mod roles;
pub mod types;
pub mod validation;
