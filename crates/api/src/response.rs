//! Shared response types for API handlers.
//!
//! Responses are keyed by entity name (`{ "order": ..., "message": ... }`),
//! which is the contract the frontend consumes. Handler modules declare
//! their own typed envelopes; only the cross-cutting ones live here.

use serde::Serialize;

/// `{ "message": "..." }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
