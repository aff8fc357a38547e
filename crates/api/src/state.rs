use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: aftercare_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
