use super::{Product, Store};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A price observed for a product at a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Price {
    pub id: i64,
    pub store_id: i64,
    pub product_id: i64,
    pub price: Decimal,
    pub currency: String,
    /// When the price was observed, not when the row was written
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,

    // Joined by the by-product listing
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<Store>,

    // Joined by the by-store listings
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}
