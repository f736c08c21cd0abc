use std::sync::Arc;

use crate::auth::jwt::TokenIssuer;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: numisroma_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(pool: numisroma_db::DbPool, config: ServerConfig) -> Self {
        let tokens = Arc::new(TokenIssuer::new(&config.jwt));
        Self {
            pool,
            config: Arc::new(config),
            tokens,
        }
    }
}
