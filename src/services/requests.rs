//! Raw request parameters, as parsed by the outer layer.
//!
//! Nothing here is normalized yet; the services turn these into shapes.

use crate::query::{Bounds, GeoPoint, Pagination, SortSpec};

/// Filtered store listing
#[derive(Debug, Clone, Default)]
pub struct StoreListOptions {
    /// Product name substring
    pub query: Option<String>,
    /// Product category
    pub category: Option<String>,
    pub bounds: Option<Bounds>,
    pub user_location: Option<GeoPoint>,
    pub pagination: Pagination,
    pub sort: SortSpec,
}

/// Stores within a radius
#[derive(Debug, Clone)]
pub struct NearbyOptions {
    pub center: GeoPoint,
    pub radius_meters: f64,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default)]
pub struct ProductListOptions {
    pub pagination: Pagination,
    pub sort: SortSpec,
}

#[derive(Debug, Clone, Default)]
pub struct ProductSearchOptions {
    pub keyword: String,
    pub pagination: Pagination,
    pub sort: SortSpec,
}

/// Price listing for a product
#[derive(Debug, Clone, Default)]
pub struct PriceListOptions {
    pub pagination: Pagination,
    pub sort: SortSpec,
}

/// Price listing for a store
#[derive(Debug, Clone, Default)]
pub struct StorePriceListOptions {
    pub category: Option<String>,
    pub pagination: Pagination,
    pub sort: SortSpec,
}

/// Store price statistics
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    pub category: Option<String>,
    pub query: Option<String>,
    /// Trailing window; out-of-range values are clamped
    pub days: i64,
}
