use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{NewRecommendation, Recommendation, RecommendationFilter};

use super::store::{RecommendationStore, StoreError, StoreResult};

/// In-process recommendation store
///
/// Selected with `DATABASE_URL=memory`. Records live in a map keyed by id;
/// ids are never reused within the lifetime of the store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    last_id: i32,
    records: BTreeMap<i32, Recommendation>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecommendationStore for MemoryStore {
    async fn create(&self, new: NewRecommendation) -> StoreResult<Recommendation> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let rec = new.with_id(inner.last_id);
        inner.records.insert(rec.id, rec.clone());

        tracing::info!(id = rec.id, product_id = rec.product_id, "Created recommendation");
        Ok(rec)
    }

    async fn find(&self, id: i32) -> StoreResult<Option<Recommendation>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&id).cloned())
    }

    async fn list(&self, filter: &RecommendationFilter) -> StoreResult<Vec<Recommendation>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .filter(|rec| filter.matches(rec))
            .cloned()
            .collect())
    }

    async fn update(&self, rec: &Recommendation) -> StoreResult<Recommendation> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .records
            .get_mut(&rec.id)
            .ok_or(StoreError::NotFound(rec.id))?;
        *stored = rec.clone();

        tracing::info!(id = rec.id, "Saved recommendation");
        Ok(rec.clone())
    }

    async fn delete(&self, rec: &Recommendation) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if inner.records.remove(&rec.id).is_some() {
            tracing::info!(id = rec.id, "Deleted recommendation");
        }
        Ok(())
    }

    async fn delete_by_pair(
        &self,
        product_id: i32,
        recommend_product_id: i32,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let id = inner
            .records
            .values()
            .find(|rec| {
                rec.product_id == product_id && rec.recommend_product_id == recommend_product_id
            })
            .map(|rec| rec.id);

        match id {
            Some(id) => {
                inner.records.remove(&id);
                tracing::info!(id, product_id, recommend_product_id, "Deleted recommendation by product pair");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
