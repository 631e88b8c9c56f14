use super::{bounded, require_positive_id};
use super::{PriceListOptions, ReadThrough, StatsOptions, StorePriceListOptions};
use crate::cache::CacheKey;
use crate::error::AppResult;
use crate::models::{Price, StorePriceStats};
use crate::query::{
    clean_text, PageLimits, PriceStatsPlan, ProductPricesShape, RecentPricesShape, Sort,
    StatsShape, StorePricesShape,
};
use crate::repositories::PriceReader;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Service for price listings and store price statistics.
///
/// Only statistics go through the cache; listings always hit the database.
pub struct PriceService {
    prices: Arc<dyn PriceReader>,
    cache: ReadThrough,
    limits: PageLimits,
    query_timeout: Duration,
}

impl PriceService {
    pub fn new(
        prices: Arc<dyn PriceReader>,
        cache: ReadThrough,
        limits: PageLimits,
        query_timeout: Duration,
    ) -> Self {
        Self {
            prices,
            cache,
            limits,
            query_timeout,
        }
    }

    /// Prices for a product, each with its store
    pub async fn prices_by_product(
        &self,
        product_id: i64,
        options: &PriceListOptions,
    ) -> AppResult<Vec<Price>> {
        require_positive_id(product_id, "product")?;
        let shape = ProductPricesShape {
            product_id,
            page: self.limits.normalize(options.pagination),
            sort: Sort::for_prices(&options.sort),
        };
        bounded("product prices", self.query_timeout, self.prices.by_product(&shape)).await
    }

    /// Prices at a store, each with its product
    pub async fn prices_by_store(
        &self,
        store_id: i64,
        options: &StorePriceListOptions,
    ) -> AppResult<Vec<Price>> {
        require_positive_id(store_id, "store")?;
        let shape = StorePricesShape {
            store_id,
            category: clean_text(options.category.as_deref()),
            page: self.limits.normalize(options.pagination),
            sort: Sort::for_prices(&options.sort),
        };
        bounded("store prices", self.query_timeout, self.prices.by_store(&shape)).await
    }

    /// Most recent observations across `store_ids`, newest first
    pub async fn recent_prices_for_stores(
        &self,
        store_ids: &[i64],
        limit: i64,
    ) -> AppResult<Vec<Price>> {
        for id in store_ids {
            require_positive_id(*id, "store")?;
        }
        let shape = RecentPricesShape::new(store_ids, self.limits.normalize_limit(limit));
        if shape.store_ids.is_empty() {
            return Ok(Vec::new());
        }
        bounded(
            "recent prices",
            self.query_timeout,
            self.prices.recent_for_stores(&shape),
        )
        .await
    }

    /// Summary and daily series over the store's trailing window.
    ///
    /// An empty window yields an all-absent summary and an empty series.
    pub async fn store_price_stats(
        &self,
        store_id: i64,
        options: &StatsOptions,
    ) -> AppResult<StorePriceStats> {
        require_positive_id(store_id, "store")?;
        let shape = StatsShape::new(
            store_id,
            options.category.as_deref(),
            options.query.as_deref(),
            options.days,
        );

        let plan = PriceStatsPlan::new(&shape);
        debug!(?plan, "price statistics plan");

        self.cache
            .get_or_load(CacheKey::StorePriceStats(&shape), || async move {
                let statistics = self.prices.statistics(&plan);
                let (summary, daily) =
                    bounded("price statistics", self.query_timeout, statistics).await?;

                Ok(StorePriceStats {
                    store_id: plan.store_id,
                    category: plan.category,
                    query: plan.name_contains,
                    days: plan.days,
                    summary,
                    daily,
                })
            })
            .await
    }
}
