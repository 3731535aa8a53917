use std::sync::Arc;

use surprise_core::content::ActiveContentResolver;
use surprise_db::content_store::PgContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy sits behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: surprise_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub resolver: Arc<ActiveContentResolver<PgContentStore>>,
}

impl AppState {
    pub fn new(pool: surprise_db::DbPool, config: ServerConfig) -> Self {
        let resolver = ActiveContentResolver::new(
            PgContentStore::new(pool.clone()),
            config.content.visibility.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        }
    }
}
