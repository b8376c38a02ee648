pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use crate::config::Config;

pub use memory::MemoryStore;
pub use postgres::{create_pool, PgStore};
pub use store::{RecommendationStore, StoreError, StoreResult};

/// Builds the store selected by the configuration
///
/// Connects and migrates the database for PostgreSQL URLs. Any error here
/// means the service cannot run.
pub async fn connect(config: &Config) -> StoreResult<Arc<dyn RecommendationStore>> {
    let store: Arc<dyn RecommendationStore> = if config.uses_memory_store() {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(PgStore::connect(&config.database_url, config.database_max_connections).await?)
    };

    tracing::info!(backend = store.name(), "Recommendation store ready");
    Ok(store)
}
