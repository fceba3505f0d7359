use std::sync::Arc;

use stockmedia_core::payments::PaymentGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stockmedia_db::DbPool,
    /// Server configuration, including vendor credentials.
    pub config: Arc<ServerConfig>,
    /// Settles checkout payments.
    pub gateway: Arc<dyn PaymentGateway>,
}
