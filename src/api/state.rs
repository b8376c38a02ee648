use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::db::{MemoryStore, RecommendationStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecommendationStore>,
    /// Accepted `recommend_type` filter values, in display order
    pub recommend_types: Arc<[String]>,
    /// Directory served at `/` instead of the JSON descriptor
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Creates state over `store` with the default recommendation types
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        Self::from_config(store, &Config::default())
    }

    /// Creates state over `store`, taking the remaining settings from `config`
    pub fn from_config(store: Arc<dyn RecommendationStore>, config: &Config) -> Self {
        Self {
            store,
            recommend_types: config.recommend_types.clone().into(),
            static_dir: config.static_dir.as_ref().map(PathBuf::from),
        }
    }

    /// State over an empty in-process store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
