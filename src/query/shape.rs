//! Normalized query shapes.
//!
//! A shape holds every parameter that influences a result set after
//! normalization. Shapes are the input to plan composition and the sole
//! basis of cache keys, so two requests with equal shapes are equivalent.

use super::geo::{Bounds, GeoPoint};
use super::page::Page;
use super::sort::{PriceSortField, ProductSortField, Sort, SortSpec, StoreSortField};
use super::stats_plan::clamp_window;

/// Trim free text; blank text counts as absent
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Store search filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreFilters {
    /// Case-insensitive product name substring
    pub query: Option<String>,
    /// Exact product category
    pub category: Option<String>,
    pub bounds: Option<Bounds>,
    pub user_location: Option<GeoPoint>,
}

impl StoreFilters {
    pub fn new(
        query: Option<&str>,
        category: Option<&str>,
        bounds: Option<Bounds>,
        user_location: Option<GeoPoint>,
    ) -> Self {
        Self {
            query: clean_text(query),
            category: clean_text(category),
            bounds,
            user_location,
        }
    }

    /// A category or name filter restricts stores to those selling a match
    pub fn has_product_filter(&self) -> bool {
        self.query.is_some() || self.category.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSearchShape {
    pub filters: StoreFilters,
    pub page: Page,
    pub sort: Sort<StoreSortField>,
}

impl StoreSearchShape {
    pub fn new(filters: StoreFilters, page: Page, sort: &SortSpec) -> Self {
        let sort = Sort::for_stores(
            sort,
            filters.user_location.is_some(),
            filters.has_product_filter(),
        );
        Self {
            filters,
            page,
            sort,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyShape {
    pub center: GeoPoint,
    pub radius_meters: f64,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductListShape {
    pub page: Page,
    pub sort: Sort<ProductSortField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearchShape {
    pub keyword: String,
    pub page: Page,
    pub sort: Sort<ProductSortField>,
}

/// Prices recorded for one product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPricesShape {
    pub product_id: i64,
    pub page: Page,
    pub sort: Sort<PriceSortField>,
}

/// Prices recorded at one store
#[derive(Debug, Clone, PartialEq)]
pub struct StorePricesShape {
    pub store_id: i64,
    /// Exact product category
    pub category: Option<String>,
    pub page: Page,
    pub sort: Sort<PriceSortField>,
}

/// Most recent prices across a set of stores
#[derive(Debug, Clone, PartialEq)]
pub struct RecentPricesShape {
    /// Sorted and deduplicated
    pub store_ids: Vec<i64>,
    pub limit: i64,
}

impl RecentPricesShape {
    pub fn new(store_ids: &[i64], limit: i64) -> Self {
        let mut store_ids = store_ids.to_vec();
        store_ids.sort_unstable();
        store_ids.dedup();
        Self { store_ids, limit }
    }
}

/// Store price statistics request with the window already clamped
#[derive(Debug, Clone, PartialEq)]
pub struct StatsShape {
    pub store_id: i64,
    pub category: Option<String>,
    pub query: Option<String>,
    pub days: i32,
}

impl StatsShape {
    pub fn new(store_id: i64, category: Option<&str>, query: Option<&str>, days: i64) -> Self {
        Self {
            store_id,
            category: clean_text(category),
            query: clean_text(query),
            days: clamp_window(days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortOrder;

    fn page() -> Page {
        Page {
            limit: 20,
            offset: 0,
        }
    }

    #[test]
    fn test_blank_text_is_absent() {
        assert_eq!(clean_text(None), None);
        assert_eq!(clean_text(Some("")), None);
        assert_eq!(clean_text(Some("   ")), None);
        assert_eq!(clean_text(Some(" dairy ")), Some("dairy".to_string()));
    }

    #[test]
    fn test_shape_resolves_sort_against_filters() {
        let filters = StoreFilters::new(None, Some("dairy"), None, None);
        let shape = StoreSearchShape::new(filters, page(), &SortSpec::new("distance", "desc"));
        assert_eq!(shape.sort.field, StoreSortField::Name);
        assert_eq!(shape.sort.order, SortOrder::Asc);

        let filters = StoreFilters::new(None, None, None, Some(GeoPoint::new(40.0, -73.0)));
        let shape = StoreSearchShape::new(filters, page(), &SortSpec::new("distance", ""));
        assert_eq!(shape.sort.field, StoreSortField::Distance);
    }

    #[test]
    fn test_recent_prices_dedups_store_ids() {
        let shape = RecentPricesShape::new(&[3, 1, 3, 2, 1], 10);
        assert_eq!(shape.store_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_stats_shape_clamps_window() {
        assert_eq!(StatsShape::new(1, None, None, 0).days, 14);
        assert_eq!(StatsShape::new(1, None, None, 9999).days, 60);
        assert_eq!(StatsShape::new(1, None, None, -5).days, 14);
        assert_eq!(StatsShape::new(1, None, None, 30).days, 30);
    }
}
