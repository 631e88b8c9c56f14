use super::{RepoResult, StoreReader};
use crate::models::Store;
use crate::query::StoreSearchPlan;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Repository for store data access
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    /// Create a new PgStoreRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreReader for PgStoreRepository {
    async fn search(&self, plan: &StoreSearchPlan) -> RepoResult<Vec<Store>> {
        let mut query = plan.to_query();
        debug!(sql = query.sql(), "Executing store search");

        let stores = query
            .build_query_as::<Store>()
            .fetch_all(&self.pool)
            .await?;
        Ok(stores)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT
                id,
                name,
                address,
                phone,
                ST_Y(location::geometry) AS latitude,
                ST_X(location::geometry) AS longitude,
                NULL::float8 AS distance,
                NULL::numeric AS min_price,
                created_at,
                updated_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }
}
