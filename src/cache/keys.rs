//! Cache key derivation.
//!
//! A key is computed from a normalized shape only. The shape is first written
//! out as a canonical string in which every field appears in a fixed order,
//! text is length-prefixed and floats use their shortest round-trip form, then
//! hashed:
//!
//! ```text
//! pricemap:v1:<namespace>:<sha256 hex of the canonical string>
//! ```

use crate::query::{
    Bounds, GeoPoint, NearbyShape, Page, ProductListShape, ProductSearchShape, StatsShape,
    StoreSearchShape,
};
use sha2::{Digest, Sha256};
use std::fmt::Write;

pub const KEY_PREFIX: &str = "pricemap:v1";

/// One cacheable request
#[derive(Debug, Clone, Copy)]
pub enum CacheKey<'a> {
    StoreSearch(&'a StoreSearchShape),
    NearbyStores(&'a NearbyShape),
    ProductList(&'a ProductListShape),
    ProductSearch(&'a ProductSearchShape),
    ProductCategories,
    StorePriceStats(&'a StatsShape),
}

impl CacheKey<'_> {
    pub fn namespace(&self) -> &'static str {
        match self {
            CacheKey::StoreSearch(_) => "stores:search",
            CacheKey::NearbyStores(_) => "stores:nearby",
            CacheKey::ProductList(_) => "products:list",
            CacheKey::ProductSearch(_) => "products:search",
            CacheKey::ProductCategories => "products:categories",
            CacheKey::StorePriceStats(_) => "stats:store",
        }
    }

    /// Unhashed field listing; equal shapes give byte-identical output
    pub fn canonical(&self) -> String {
        let mut out = Canonical::default();
        match self {
            CacheKey::StoreSearch(shape) => {
                out.text("q", shape.filters.query.as_deref());
                out.text("category", shape.filters.category.as_deref());
                out.bounds(shape.filters.bounds.as_ref());
                out.point("loc", shape.filters.user_location.as_ref());
                out.page(&shape.page);
                out.raw("sort", shape.sort.field.as_str());
                out.raw("order", shape.sort.order.as_sql());
            }
            CacheKey::NearbyStores(shape) => {
                out.point("center", Some(&shape.center));
                out.float("radius", shape.radius_meters);
                out.page(&shape.page);
            }
            CacheKey::ProductList(shape) => {
                out.page(&shape.page);
                out.raw("sort", shape.sort.field.as_str());
                out.raw("order", shape.sort.order.as_sql());
            }
            CacheKey::ProductSearch(shape) => {
                out.text("keyword", Some(&shape.keyword));
                out.page(&shape.page);
                out.raw("sort", shape.sort.field.as_str());
                out.raw("order", shape.sort.order.as_sql());
            }
            CacheKey::ProductCategories => {}
            CacheKey::StorePriceStats(shape) => {
                out.int("store", shape.store_id);
                out.text("category", shape.category.as_deref());
                out.text("q", shape.query.as_deref());
                out.int("days", i64::from(shape.days));
            }
        }
        out.0
    }

    /// The string handed to the cache backend
    pub fn render(&self) -> String {
        let digest = Sha256::digest(self.canonical().as_bytes());
        format!("{}:{}:{}", KEY_PREFIX, self.namespace(), hex::encode(digest))
    }
}

#[derive(Default)]
struct Canonical(String);

impl Canonical {
    fn raw(&mut self, name: &str, value: &str) {
        let _ = write!(self.0, "{}={};", name, value);
    }

    fn int(&mut self, name: &str, value: i64) {
        let _ = write!(self.0, "{}={};", name, value);
    }

    fn float(&mut self, name: &str, value: f64) {
        // -0.0 == 0.0, so they must not produce different keys
        let value = if value == 0.0 { 0.0 } else { value };
        let _ = write!(self.0, "{}={};", name, value);
    }

    fn text(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(text) => {
                let _ = write!(self.0, "{}={}:{};", name, text.len(), text);
            }
            None => self.raw(name, "-"),
        }
    }

    fn point(&mut self, name: &str, point: Option<&GeoPoint>) {
        match point {
            Some(point) => {
                self.float(&format!("{}.lat", name), point.lat);
                self.float(&format!("{}.lon", name), point.lon);
            }
            None => self.raw(name, "-"),
        }
    }

    fn bounds(&mut self, bounds: Option<&Bounds>) {
        match bounds {
            Some(b) => {
                self.float("bbox.min_lat", b.min_lat);
                self.float("bbox.min_lon", b.min_lon);
                self.float("bbox.max_lat", b.max_lat);
                self.float("bbox.max_lon", b.max_lon);
            }
            None => self.raw("bbox", "-"),
        }
    }

    fn page(&mut self, page: &Page) {
        self.int("limit", page.limit);
        self.int("offset", page.offset);
    }
}
