use crate::models::{Criterion, NewRecommendation, Recommendation, RecommendationFilter};

/// Errors raised by a recommendation store
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Recommendation {0} does not exist")]
    NotFound(i32),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence abstraction over the recommendations table
///
/// Every write runs as one statement in its own transaction; a failed write
/// leaves the store unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persists a new record and returns it with its assigned id
    async fn create(&self, new: NewRecommendation) -> StoreResult<Recommendation>;

    /// Looks up a record by id; absence is not an error
    async fn find(&self, id: i32) -> StoreResult<Option<Recommendation>>;

    /// Returns every record matching all criteria of `filter`
    async fn list(&self, filter: &RecommendationFilter) -> StoreResult<Vec<Recommendation>>;

    /// Writes the current field values of an already-loaded record
    async fn update(&self, rec: &Recommendation) -> StoreResult<Recommendation>;

    /// Removes a record; removing an absent record is not an error
    async fn delete(&self, rec: &Recommendation) -> StoreResult<()>;

    /// Removes the lowest-id record matching both product ids.
    /// Returns whether a record was removed.
    async fn delete_by_pair(&self, product_id: i32, recommend_product_id: i32)
        -> StoreResult<bool>;

    /// Returns every record matching a single field/value pair
    async fn find_by(&self, criterion: Criterion) -> StoreResult<Vec<Recommendation>> {
        self.list(&RecommendationFilter::from(criterion)).await
    }

    async fn all(&self) -> StoreResult<Vec<Recommendation>> {
        self.list(&RecommendationFilter::new()).await
    }

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
