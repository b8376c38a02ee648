use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};

use crate::models::{Criterion, NewRecommendation, Recommendation, RecommendationFilter};

use super::store::{RecommendationStore, StoreError, StoreResult};

const COLUMNS: &str = "id, product_id, customer_id, product_name, recommendation_name, \
                       recommend_product_id, recommend_type, rec_success";

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Recommendation store backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool and brings the schema up to date
    pub async fn new(pool: PgPool) -> StoreResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
        Ok(Self { pool })
    }

    /// Connects to `database_url` and runs migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = create_pool(database_url, max_connections).await?;
        Self::new(pool).await
    }
}

fn push_criterion(qb: &mut QueryBuilder<'_, Postgres>, criterion: &Criterion) {
    match criterion {
        Criterion::ProductId(v) => qb.push("product_id = ").push_bind(*v),
        Criterion::CustomerId(v) => qb.push("customer_id = ").push_bind(*v),
        Criterion::ProductName(v) => qb.push("product_name = ").push_bind(v.clone()),
        Criterion::RecommendationName(v) => {
            qb.push("recommendation_name = ").push_bind(v.clone())
        }
        Criterion::RecommendProductId(v) => qb.push("recommend_product_id = ").push_bind(*v),
        Criterion::RecommendType(v) => qb.push("recommend_type = ").push_bind(v.clone()),
        Criterion::RecSuccess(v) => qb.push("rec_success = ").push_bind(*v),
        Criterion::RecSuccessMin(v) => qb.push("rec_success >= ").push_bind(*v),
        Criterion::RecSuccessMax(v) => qb.push("rec_success <= ").push_bind(*v),
    };
}

#[async_trait::async_trait]
impl RecommendationStore for PgStore {
    async fn create(&self, new: NewRecommendation) -> StoreResult<Recommendation> {
        tracing::info!(product_id = new.product_id, "Creating recommendation");

        let mut tx = self.pool.begin().await?;
        let rec = sqlx::query_as::<_, Recommendation>(&format!(
            "INSERT INTO recommendations \
             (product_id, customer_id, product_name, recommendation_name, \
              recommend_product_id, recommend_type, rec_success) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(new.product_id)
        .bind(new.customer_id)
        .bind(&new.product_name)
        .bind(&new.recommendation_name)
        .bind(new.recommend_product_id)
        .bind(&new.recommend_type)
        .bind(new.rec_success)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, product_id = new.product_id, "Error creating record");
            e
        })?;
        tx.commit().await?;

        Ok(rec)
    }

    async fn find(&self, id: i32) -> StoreResult<Option<Recommendation>> {
        tracing::debug!(id, "Looking up recommendation");

        let rec = sqlx::query_as::<_, Recommendation>(&format!(
            "SELECT {COLUMNS} FROM recommendations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn list(&self, filter: &RecommendationFilter) -> StoreResult<Vec<Recommendation>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM recommendations"));

        let mut separator = " WHERE ";
        for criterion in filter.criteria() {
            qb.push(separator);
            push_criterion(&mut qb, criterion);
            separator = " AND ";
        }
        qb.push(" ORDER BY id");

        let recs = qb
            .build_query_as::<Recommendation>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(criteria = filter.criteria().len(), count = recs.len(), "Listed recommendations");

        Ok(recs)
    }

    async fn update(&self, rec: &Recommendation) -> StoreResult<Recommendation> {
        tracing::info!(id = rec.id, "Saving recommendation");

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query_as::<_, Recommendation>(&format!(
            "UPDATE recommendations SET \
             product_id = $2, customer_id = $3, product_name = $4, recommendation_name = $5, \
             recommend_product_id = $6, recommend_type = $7, rec_success = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(rec.id)
        .bind(rec.product_id)
        .bind(rec.customer_id)
        .bind(&rec.product_name)
        .bind(&rec.recommendation_name)
        .bind(rec.recommend_product_id)
        .bind(&rec.recommend_type)
        .bind(rec.rec_success)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id = rec.id, "Error updating record");
            e
        })?
        .ok_or(StoreError::NotFound(rec.id))?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn delete(&self, rec: &Recommendation) -> StoreResult<()> {
        tracing::info!(id = rec.id, "Deleting recommendation");

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM recommendations WHERE id = $1")
            .bind(rec.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id = rec.id, "Error deleting record");
                e
            })?;
        tx.commit().await?;

        Ok(())
    }

    async fn delete_by_pair(
        &self,
        product_id: i32,
        recommend_product_id: i32,
    ) -> StoreResult<bool> {
        tracing::info!(product_id, recommend_product_id, "Deleting recommendation by product pair");

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "DELETE FROM recommendations WHERE id = ( \
                 SELECT id FROM recommendations \
                 WHERE product_id = $1 AND recommend_product_id = $2 \
                 ORDER BY id LIMIT 1)",
        )
        .bind(product_id)
        .bind(recommend_product_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
