//! Sort resolution.
//!
//! Every requested field/direction pair maps onto a small fixed set of
//! columns per entity. Unknown input falls back to the entity default.

use serde::{Deserialize, Serialize};

/// Requested sort, exactly as received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: String,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: order.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only a case-insensitive `desc` yields descending
    pub fn parse(requested: &str) -> Self {
        if requested.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub fn normalize_order(requested: &str) -> SortOrder {
    SortOrder::parse(requested)
}

fn token(requested: &str) -> String {
    requested.trim().to_ascii_lowercase()
}

/// Store listing sort columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreSortField {
    Name,
    CreatedAt,
    Distance,
    MinPrice,
}

impl StoreSortField {
    /// `distance` needs a user location and `price` needs a product filter;
    /// without them the derived column is NULL on every row, so both fall
    /// back to `name`.
    pub fn resolve(requested: &str, has_location: bool, has_product_filter: bool) -> Self {
        match token(requested).as_str() {
            "created_at" => StoreSortField::CreatedAt,
            "distance" if has_location => StoreSortField::Distance,
            "price" | "min_price" if has_product_filter => StoreSortField::MinPrice,
            _ => StoreSortField::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreSortField::Name => "name",
            StoreSortField::CreatedAt => "created_at",
            StoreSortField::Distance => "distance",
            StoreSortField::MinPrice => "price",
        }
    }

    /// Request-scoped columns that may be NULL
    pub fn is_derived(&self) -> bool {
        matches!(self, StoreSortField::Distance | StoreSortField::MinPrice)
    }
}

/// Product listing sort columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortField {
    Name,
    CreatedAt,
}

impl ProductSortField {
    pub fn resolve(requested: &str) -> Self {
        match token(requested).as_str() {
            "created_at" => ProductSortField::CreatedAt,
            _ => ProductSortField::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSortField::Name => "name",
            ProductSortField::CreatedAt => "created_at",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ProductSortField::Name => "name",
            ProductSortField::CreatedAt => "created_at",
        }
    }
}

/// Price listing sort columns, shared by the by-product and by-store listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSortField {
    Price,
    RecordedAt,
}

impl PriceSortField {
    pub fn resolve(requested: &str) -> Self {
        match token(requested).as_str() {
            "recorded_at" => PriceSortField::RecordedAt,
            _ => PriceSortField::Price,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSortField::Price => "price",
            PriceSortField::RecordedAt => "recorded_at",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            PriceSortField::Price => "p.price",
            PriceSortField::RecordedAt => "p.recorded_at",
        }
    }
}

/// A resolved (column, direction) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort<F> {
    pub field: F,
    pub order: SortOrder,
}

impl Sort<StoreSortField> {
    /// A derived sort that degraded to `name` is always ascending.
    pub fn for_stores(spec: &SortSpec, has_location: bool, has_product_filter: bool) -> Self {
        let field = StoreSortField::resolve(&spec.field, has_location, has_product_filter);
        let degraded = field == StoreSortField::Name
            && matches!(token(&spec.field).as_str(), "distance" | "price" | "min_price");
        Self {
            field,
            order: if degraded {
                SortOrder::Asc
            } else {
                SortOrder::parse(&spec.order)
            },
        }
    }
}

impl Sort<ProductSortField> {
    pub fn for_products(spec: &SortSpec) -> Self {
        Self {
            field: ProductSortField::resolve(&spec.field),
            order: SortOrder::parse(&spec.order),
        }
    }
}

impl Sort<PriceSortField> {
    pub fn for_prices(spec: &SortSpec) -> Self {
        Self {
            field: PriceSortField::resolve(&spec.field),
            order: SortOrder::parse(&spec.order),
        }
    }
}
