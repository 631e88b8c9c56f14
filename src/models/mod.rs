//! Domain models for the price comparison backend.
//!
//! Stores, products and prices are read-only here; they are populated by a
//! separate ingestion process. Every model doubles as the cache payload.

pub mod price;
pub mod product;
pub mod stats;
pub mod store;

// Re-export all models for convenient access
pub use price::Price;
pub use product::Product;
pub use stats::{DailyPriceStats, PriceSummary, StorePriceStats};
pub use store::Store;
