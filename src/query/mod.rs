//! Query shapes, normalization and SQL composition.
//!
//! Everything in this module is pure: shapes are normalized request values
//! and plans are structured descriptions of the statements the repositories
//! execute.

pub mod geo;
pub mod page;
pub mod shape;
pub mod sort;
pub mod stats_plan;
pub mod store_plan;

pub use geo::{Bounds, GeoPoint};
pub use page::{normalize_offset, Page, PageLimits, Pagination, DEFAULT_LIMIT, MAX_LIMIT};
pub use shape::{
    clean_text, NearbyShape, ProductListShape, ProductPricesShape, ProductSearchShape,
    RecentPricesShape, StatsShape, StoreFilters, StorePricesShape, StoreSearchShape,
};
pub use sort::{
    normalize_order, PriceSortField, ProductSortField, Sort, SortOrder, SortSpec, StoreSortField,
};
pub use stats_plan::{clamp_window, PriceStatsPlan, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
pub use store_plan::{
    DistanceColumn, MinPriceColumn, OrderClause, ProductMatch, StorePredicate, StoreSearchPlan,
};

/// `ILIKE` pattern matching `text` as a literal substring
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
