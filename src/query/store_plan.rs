//! Store search composition.
//!
//! [`StoreSearchPlan`] is the structured form of one store query: which
//! derived columns exist, which predicates apply, and how rows are ordered
//! and paged. It is built from a [`StoreSearchShape`] or [`NearbyShape`]
//! without touching the database, and rendered into a parameterized
//! statement by [`StoreSearchPlan::to_query`]. User-supplied values only ever
//! reach SQL through bind parameters; column names come from enums.

use super::geo::{Bounds, GeoPoint};
use super::shape::{NearbyShape, StoreFilters, StoreSearchShape};
use super::sort::{SortOrder, StoreSortField};
use super::contains_pattern;
use sqlx::{Postgres, QueryBuilder};

/// Geodesic distance from a user point, in meters
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceColumn {
    /// NULL on every row
    Null,
    From(GeoPoint),
}

/// Cheapest matching price per store
#[derive(Debug, Clone, PartialEq)]
pub enum MinPriceColumn {
    /// NULL on every row
    Null,
    Matching(ProductMatch),
}

/// Products counted towards a store's minimum price
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductMatch {
    /// Exact category
    pub category: Option<String>,
    /// Case-insensitive literal substring of the product name
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorePredicate {
    /// Store point inside the envelope
    WithinBounds(Bounds),
    /// Store within `meters` of `center`
    WithinRadius { center: GeoPoint, meters: f64 },
    /// Store sells at least one product matching the min-price filter
    HasMatchingPrice,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderClause {
    pub field: StoreSortField,
    pub order: SortOrder,
    /// Rows without a value go after every row with one, in both directions
    pub nulls_last: bool,
}

impl OrderClause {
    fn new(field: StoreSortField, order: SortOrder) -> Self {
        Self {
            field,
            order,
            nulls_last: field.is_derived(),
        }
    }

    fn column(&self) -> &'static str {
        match self.field {
            StoreSortField::Name => "s.name",
            StoreSortField::CreatedAt => "s.created_at",
            StoreSortField::Distance => "distance",
            StoreSortField::MinPrice => "min_price",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSearchPlan {
    pub distance: DistanceColumn,
    pub min_price: MinPriceColumn,
    pub predicates: Vec<StorePredicate>,
    pub order: OrderClause,
    pub limit: i64,
    pub offset: i64,
}

impl StoreSearchPlan {
    /// Filtered, sorted, paginated store listing
    pub fn search(shape: &StoreSearchShape) -> Self {
        let StoreFilters {
            query,
            category,
            bounds,
            user_location,
        } = &shape.filters;

        let distance = match user_location {
            Some(point) => DistanceColumn::From(*point),
            None => DistanceColumn::Null,
        };

        let mut predicates = Vec::new();
        if let Some(bounds) = bounds {
            predicates.push(StorePredicate::WithinBounds(*bounds));
        }

        let min_price = if shape.filters.has_product_filter() {
            predicates.push(StorePredicate::HasMatchingPrice);
            MinPriceColumn::Matching(ProductMatch {
                category: category.clone(),
                name_contains: query.clone(),
            })
        } else {
            MinPriceColumn::Null
        };

        // The shape already degraded distance/price when their column is NULL
        let (field, order) = match (shape.sort.field, &distance, &min_price) {
            (StoreSortField::Distance, DistanceColumn::Null, _)
            | (StoreSortField::MinPrice, _, MinPriceColumn::Null) => {
                (StoreSortField::Name, SortOrder::Asc)
            }
            (field, _, _) => (field, shape.sort.order),
        };

        Self {
            distance,
            min_price,
            predicates,
            order: OrderClause::new(field, order),
            limit: shape.page.limit,
            offset: shape.page.offset,
        }
    }

    /// Stores within a radius of a point, nearest first
    pub fn nearby(shape: &NearbyShape) -> Self {
        Self {
            distance: DistanceColumn::From(shape.center),
            min_price: MinPriceColumn::Null,
            predicates: vec![StorePredicate::WithinRadius {
                center: shape.center,
                meters: shape.radius_meters,
            }],
            order: OrderClause::new(StoreSortField::Distance, SortOrder::Asc),
            limit: shape.page.limit,
            offset: shape.page.offset,
        }
    }

    /// Render the plan as a parameterized PostgreSQL statement
    pub fn to_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT s.id, s.name, s.address, s.phone, \
             ST_Y(s.location::geometry) AS latitude, \
             ST_X(s.location::geometry) AS longitude, ",
        );

        match &self.distance {
            DistanceColumn::Null => {
                qb.push("NULL::float8");
            }
            DistanceColumn::From(point) => {
                qb.push("ST_Distance(s.location, ");
                push_geography(&mut qb, point);
                qb.push(")");
            }
        }
        qb.push(" AS distance, ");

        match &self.min_price {
            MinPriceColumn::Null => qb.push("NULL::numeric"),
            MinPriceColumn::Matching(_) => qb.push("price_summary.min_price"),
        };
        qb.push(" AS min_price, s.created_at, s.updated_at FROM stores s");

        if let MinPriceColumn::Matching(product) = &self.min_price {
            qb.push(
                " LEFT JOIN LATERAL (SELECT MIN(p.price) AS min_price FROM prices p \
                 JOIN products pr ON pr.id = p.product_id \
                 WHERE p.store_id = s.id",
            );
            if let Some(category) = &product.category {
                qb.push(" AND pr.category = ").push_bind(category.clone());
            }
            if let Some(name) = &product.name_contains {
                qb.push(" AND pr.name ILIKE ")
                    .push_bind(contains_pattern(name));
            }
            qb.push(") price_summary ON true");
        }

        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match predicate {
                StorePredicate::WithinBounds(bounds) => {
                    qb.push("ST_Intersects(s.location::geometry, ST_MakeEnvelope(")
                        .push_bind(bounds.min_lon)
                        .push(", ")
                        .push_bind(bounds.min_lat)
                        .push(", ")
                        .push_bind(bounds.max_lon)
                        .push(", ")
                        .push_bind(bounds.max_lat)
                        .push(", 4326))");
                }
                StorePredicate::WithinRadius { center, meters } => {
                    qb.push("ST_DWithin(s.location, ");
                    push_geography(&mut qb, center);
                    qb.push(", ").push_bind(*meters).push(")");
                }
                StorePredicate::HasMatchingPrice => {
                    qb.push("price_summary.min_price IS NOT NULL");
                }
            }
        }

        qb.push(" ORDER BY ")
            .push(self.order.column())
            .push(" ")
            .push(self.order.order.as_sql());
        if self.order.nulls_last {
            qb.push(" NULLS LAST");
        }
        // Stable pages over equal sort values
        qb.push(", s.id ASC");

        qb.push(" LIMIT ")
            .push_bind(self.limit)
            .push(" OFFSET ")
            .push_bind(self.offset);

        qb
    }
}

fn push_geography(qb: &mut QueryBuilder<'static, Postgres>, point: &GeoPoint) {
    qb.push("ST_SetSRID(ST_MakePoint(")
        .push_bind(point.lon)
        .push(", ")
        .push_bind(point.lat)
        .push("), 4326)::geography");
}
