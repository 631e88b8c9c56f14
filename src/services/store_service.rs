use super::{bounded, require_positive_id, require_valid_bounds, require_valid_point};
use super::{NearbyOptions, ReadThrough, StoreListOptions};
use crate::cache::CacheKey;
use crate::error::{AppError, AppResult};
use crate::models::Store;
use crate::query::{NearbyShape, PageLimits, StoreFilters, StoreSearchPlan, StoreSearchShape};
use crate::repositories::StoreReader;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Service for store discovery
pub struct StoreService {
    stores: Arc<dyn StoreReader>,
    cache: ReadThrough,
    limits: PageLimits,
    query_timeout: Duration,
}

impl StoreService {
    pub fn new(
        stores: Arc<dyn StoreReader>,
        cache: ReadThrough,
        limits: PageLimits,
        query_timeout: Duration,
    ) -> Self {
        Self {
            stores,
            cache,
            limits,
            query_timeout,
        }
    }

    /// Normalize a listing request
    pub fn search_shape(&self, options: &StoreListOptions) -> AppResult<StoreSearchShape> {
        if let Some(bounds) = &options.bounds {
            require_valid_bounds(bounds)?;
        }
        if let Some(location) = &options.user_location {
            require_valid_point(location, "user location")?;
        }

        let filters = StoreFilters::new(
            options.query.as_deref(),
            options.category.as_deref(),
            options.bounds,
            options.user_location,
        );
        Ok(StoreSearchShape::new(
            filters,
            self.limits.normalize(options.pagination),
            &options.sort,
        ))
    }

    /// Filtered, sorted, paginated store listing.
    ///
    /// `distance` is set on every row when a user location is given;
    /// `min_price` is set when a category or name filter is given, and stores
    /// without a matching priced product are left out.
    pub async fn search_stores(&self, options: &StoreListOptions) -> AppResult<Vec<Store>> {
        let shape = self.search_shape(options)?;
        let plan = StoreSearchPlan::search(&shape);
        debug!(?plan, "store search plan");

        self.cache
            .get_or_load(CacheKey::StoreSearch(&shape), || {
                bounded("store search", self.query_timeout, self.stores.search(&plan))
            })
            .await
    }

    /// Stores within `radius_meters` of a point, nearest first
    pub async fn nearby_stores(&self, options: &NearbyOptions) -> AppResult<Vec<Store>> {
        require_valid_point(&options.center, "center")?;
        if !options.radius_meters.is_finite() || options.radius_meters <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "radius must be a positive number of meters, got {}",
                options.radius_meters
            )));
        }

        let shape = NearbyShape {
            center: options.center,
            radius_meters: options.radius_meters,
            page: self.limits.normalize(options.pagination),
        };

        let plan = StoreSearchPlan::nearby(&shape);

        self.cache
            .get_or_load(CacheKey::NearbyStores(&shape), || {
                bounded("nearby stores", self.query_timeout, self.stores.search(&plan))
            })
            .await
    }

    /// A single store; `None` when it does not exist
    pub async fn get_store(&self, id: i64) -> AppResult<Option<Store>> {
        require_positive_id(id, "store")?;
        bounded("store lookup", self.query_timeout, self.stores.find_by_id(id)).await
    }
}
