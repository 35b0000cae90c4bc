use std::sync::Arc;

use crate::db::Cache;
use crate::engine::Recommender;

/// Shared application state
///
/// Everything here is read-only after startup: the engine holds the record
/// store and the static lookup tables; the cache is optional so the service
/// runs uncached when Redis is not configured.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub cache: Option<Cache>,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, cache: Option<Cache>) -> Self {
        Self { recommender, cache }
    }
}
