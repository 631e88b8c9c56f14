//! Data access.
//!
//! Services depend on the reader traits only; the `Pg*` types are the
//! PostgreSQL/PostGIS adapters.

pub mod price_repository;
pub mod product_repository;
pub mod store_repository;

use crate::error::RepositoryError;
use crate::models::{DailyPriceStats, Price, PriceSummary, Product, Store};
use crate::query::{
    PriceStatsPlan, ProductListShape, ProductPricesShape, ProductSearchShape, RecentPricesShape,
    StorePricesShape, StoreSearchPlan,
};
use async_trait::async_trait;

// Re-export all repositories for convenient access
pub use price_repository::PgPriceRepository;
pub use product_repository::PgProductRepository;
pub use store_repository::PgStoreRepository;

pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait StoreReader: Send + Sync {
    /// Execute a composed store query
    async fn search(&self, plan: &StoreSearchPlan) -> RepoResult<Vec<Store>>;

    /// Plain store row, derived fields absent
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Store>>;
}

#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn list(&self, shape: &ProductListShape) -> RepoResult<Vec<Product>>;

    /// Case-insensitive substring match on the product name
    async fn search(&self, shape: &ProductSearchShape) -> RepoResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>>;

    /// Distinct non-empty categories, ascending
    async fn categories(&self) -> RepoResult<Vec<String>>;
}

#[async_trait]
pub trait PriceReader: Send + Sync {
    /// Prices for one product, each with its store attached
    async fn by_product(&self, shape: &ProductPricesShape) -> RepoResult<Vec<Price>>;

    /// Prices at one store, each with its product attached
    async fn by_store(&self, shape: &StorePricesShape) -> RepoResult<Vec<Price>>;

    /// Newest first, each with its product attached
    async fn recent_for_stores(&self, shape: &RecentPricesShape) -> RepoResult<Vec<Price>>;

    /// Window summary and the per-day series
    async fn statistics(
        &self,
        plan: &PriceStatsPlan,
    ) -> RepoResult<(PriceSummary, Vec<DailyPriceStats>)>;
}
