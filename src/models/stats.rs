use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Aggregate over the whole statistics window.
///
/// Every field is `None` when the window holds no observations, so "no
/// data" never reads as a zero price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PriceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl PriceSummary {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.avg_price.is_none()
    }
}

/// Aggregate for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailyPriceStats {
    pub date: NaiveDate,
    pub avg_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub count: i64,
}

/// Price trend report for one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePriceStats {
    pub store_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Effective window after clamping
    pub days: i32,
    pub summary: PriceSummary,
    /// Sparse, ascending by date
    pub daily: Vec<DailyPriceStats>,
}
