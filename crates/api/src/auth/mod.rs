//! Authentication primitives.
//!
//! - [`jwt`] -- download token generation and validation.
//! - [`session`] -- identity provider session tokens and cookies.

pub mod jwt;
pub mod session;
