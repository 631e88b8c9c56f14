use super::{ProductReader, RepoResult};
use crate::models::Product;
use crate::query::{
    contains_pattern, Page, ProductListShape, ProductSearchShape, ProductSortField, Sort,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

const PRODUCT_COLUMNS: &str = "SELECT id, name, category, barcode, created_at FROM products";

/// Repository for product data access
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new PgProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_order_and_page(
    qb: &mut QueryBuilder<'static, Postgres>,
    sort: &Sort<ProductSortField>,
    page: &Page,
) {
    qb.push(" ORDER BY ")
        .push(sort.field.column())
        .push(" ")
        .push(sort.order.as_sql())
        .push(", id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
}

#[async_trait]
impl ProductReader for PgProductRepository {
    async fn list(&self, shape: &ProductListShape) -> RepoResult<Vec<Product>> {
        let mut qb = QueryBuilder::new(PRODUCT_COLUMNS);
        push_order_and_page(&mut qb, &shape.sort, &shape.page);

        let products = qb.build_query_as::<Product>().fetch_all(&self.pool).await?;
        Ok(products)
    }

    async fn search(&self, shape: &ProductSearchShape) -> RepoResult<Vec<Product>> {
        let mut qb = QueryBuilder::new(PRODUCT_COLUMNS);
        qb.push(" WHERE name ILIKE ")
            .push_bind(contains_pattern(&shape.keyword));
        push_order_and_page(&mut qb, &shape.sort, &shape.page);

        let products = qb.build_query_as::<Product>().fetch_all(&self.pool).await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, barcode, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn categories(&self) -> RepoResult<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM products
            WHERE category <> ''
            ORDER BY category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }
}
