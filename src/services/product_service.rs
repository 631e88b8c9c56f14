use super::{bounded, require_positive_id};
use super::{ProductListOptions, ProductSearchOptions, ReadThrough};
use crate::cache::CacheKey;
use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::query::{clean_text, PageLimits, ProductListShape, ProductSearchShape, Sort};
use crate::repositories::ProductReader;
use std::sync::Arc;
use std::time::Duration;

/// Service for the product catalog
pub struct ProductService {
    products: Arc<dyn ProductReader>,
    cache: ReadThrough,
    limits: PageLimits,
    query_timeout: Duration,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductReader>,
        cache: ReadThrough,
        limits: PageLimits,
        query_timeout: Duration,
    ) -> Self {
        Self {
            products,
            cache,
            limits,
            query_timeout,
        }
    }

    pub async fn list_products(&self, options: &ProductListOptions) -> AppResult<Vec<Product>> {
        let shape = ProductListShape {
            page: self.limits.normalize(options.pagination),
            sort: Sort::for_products(&options.sort),
        };

        self.cache
            .get_or_load(CacheKey::ProductList(&shape), || {
                bounded("product list", self.query_timeout, self.products.list(&shape))
            })
            .await
    }

    /// Products whose name contains the keyword, ignoring case
    pub async fn search_products(
        &self,
        options: &ProductSearchOptions,
    ) -> AppResult<Vec<Product>> {
        let keyword = clean_text(Some(&options.keyword))
            .ok_or_else(|| AppError::InvalidArgument("search keyword is required".into()))?;
        let shape = ProductSearchShape {
            keyword,
            page: self.limits.normalize(options.pagination),
            sort: Sort::for_products(&options.sort),
        };

        self.cache
            .get_or_load(CacheKey::ProductSearch(&shape), || {
                bounded("product search", self.query_timeout, self.products.search(&shape))
            })
            .await
    }

    /// A single product; `None` when it does not exist
    pub async fn get_product(&self, id: i64) -> AppResult<Option<Product>> {
        require_positive_id(id, "product")?;
        bounded("product lookup", self.query_timeout, self.products.find_by_id(id)).await
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.cache
            .get_or_load(CacheKey::ProductCategories, || {
                bounded("product categories", self.query_timeout, self.products.categories())
            })
            .await
    }
}
