//! Store price statistics composition.
//!
//! Both statistics statements share one `filtered` CTE: the store's price
//! observations inside the trailing window, optionally narrowed by product
//! category and name, each tagged with its calendar day.

use super::contains_pattern;
use super::shape::StatsShape;
use sqlx::{Postgres, QueryBuilder};

pub const DEFAULT_WINDOW_DAYS: i32 = 14;
pub const MAX_WINDOW_DAYS: i32 = 60;

/// Non-positive windows use the default; long windows are capped
pub fn clamp_window(days: i64) -> i32 {
    if days <= 0 {
        DEFAULT_WINDOW_DAYS
    } else if days > i64::from(MAX_WINDOW_DAYS) {
        MAX_WINDOW_DAYS
    } else {
        days as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceStatsPlan {
    pub store_id: i64,
    pub category: Option<String>,
    pub name_contains: Option<String>,
    pub days: i32,
}

impl PriceStatsPlan {
    pub fn new(shape: &StatsShape) -> Self {
        Self {
            store_id: shape.store_id,
            category: shape.category.clone(),
            name_contains: shape.query.clone(),
            days: shape.days,
        }
    }

    fn with_filtered(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "WITH filtered AS (SELECT p.price, p.currency, p.recorded_at::date AS day \
             FROM prices p JOIN products pr ON pr.id = p.product_id WHERE p.store_id = ",
        );
        qb.push_bind(self.store_id)
            .push(" AND p.recorded_at >= NOW() - make_interval(days => ")
            .push_bind(self.days)
            .push(")");
        if let Some(category) = &self.category {
            qb.push(" AND pr.category = ").push_bind(category.clone());
        }
        if let Some(name) = &self.name_contains {
            qb.push(" AND pr.name ILIKE ").push_bind(contains_pattern(name));
        }
        qb.push(") ");
        qb
    }

    /// One row; every aggregate is NULL when the window is empty.
    /// `MIN(currency)` picks the lexicographically smallest code.
    pub fn summary_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = self.with_filtered();
        qb.push(
            "SELECT MIN(price) AS min_price, MAX(price) AS max_price, \
             AVG(price) AS avg_price, MIN(currency) AS currency FROM filtered",
        );
        qb
    }

    /// One row per observed day, oldest first
    pub fn daily_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = self.with_filtered();
        qb.push(
            "SELECT day AS date, AVG(price) AS avg_price, MIN(price) AS min_price, \
             MAX(price) AS max_price, COUNT(*) AS count FROM filtered \
             GROUP BY day ORDER BY day ASC",
        );
        qb
    }
}
