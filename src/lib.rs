//! Pricemap Backend Library
//!
//! Geolocated price comparison: store search with distance and cheapest
//! matching price, product catalog lookups, and per-store price statistics,
//! served from PostgreSQL/PostGIS behind a read-through cache.

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use cache::{Cache, RedisCache};
use database::{create_pool, run_migrations, Database};
use repositories::{
    PgPriceRepository, PgProductRepository, PgStoreRepository, PriceReader, ProductReader,
    StoreReader,
};
use services::{PriceService, ProductService, ReadThrough, StoreService};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state containing all services
pub struct AppState {
    pub database: Option<Database>,
    pub stores: Arc<StoreService>,
    pub products: Arc<ProductService>,
    pub prices: Arc<PriceService>,
}

impl AppState {
    /// Connect to PostgreSQL and, when configured, Redis, then wire the
    /// services. An unreachable Redis is logged and the services run without
    /// a cache.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        info!("Connecting to database...");
        let pool = create_pool(&config.database).await?;

        if config.database.run_migrations {
            run_migrations(&pool, None).await?;
        }

        let cache: Option<Arc<dyn Cache>> = match &config.cache.redis_url {
            Some(url) if config.cache.is_enabled() => match RedisCache::connect(url).await {
                Ok(redis) => Some(Arc::new(redis)),
                Err(e) => {
                    warn!(error = %e, "Redis unavailable, running without cache");
                    None
                }
            },
            _ => {
                info!("Cache disabled");
                None
            }
        };

        let mut state = Self::new(
            Arc::new(PgStoreRepository::new(pool.clone())),
            Arc::new(PgProductRepository::new(pool.clone())),
            Arc::new(PgPriceRepository::new(pool.clone())),
            cache,
            config,
        );
        state.database = Some(Database::new(pool));

        info!(
            environment = %config.environment,
            cache_ttl_secs = config.cache.ttl_secs,
            "application state initialized"
        );
        Ok(state)
    }

    /// Round-trip to PostgreSQL; always succeeds without a database
    pub async fn health_check(&self) -> AppResult<()> {
        if let Some(database) = &self.database {
            sqlx::query("SELECT 1")
                .execute(database.pool())
                .await
                .map_err(error::RepositoryError::from)?;
        }
        Ok(())
    }

    /// Wire the services over explicit readers and cache
    pub fn new(
        stores: Arc<dyn StoreReader>,
        products: Arc<dyn ProductReader>,
        prices: Arc<dyn PriceReader>,
        cache: Option<Arc<dyn Cache>>,
        config: &AppConfig,
    ) -> Self {
        let read_through = ReadThrough::from_config(cache, &config.cache);
        let limits = config.pagination;
        let query_timeout = config.database.query_timeout();

        Self {
            database: None,
            stores: Arc::new(StoreService::new(
                stores,
                read_through.clone(),
                limits,
                query_timeout,
            )),
            products: Arc::new(ProductService::new(
                products,
                read_through.clone(),
                limits,
                query_timeout,
            )),
            prices: Arc::new(PriceService::new(prices, read_through, limits, query_timeout)),
        }
    }
}
