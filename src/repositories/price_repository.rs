use super::{PriceReader, RepoResult};
use crate::models::{DailyPriceStats, Price, PriceSummary, Product, Store};
use crate::query::{
    Page, PriceSortField, PriceStatsPlan, ProductPricesShape, RecentPricesShape, Sort,
    StorePricesShape,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

/// Repository for price data access
pub struct PgPriceRepository {
    pool: PgPool,
}

impl PgPriceRepository {
    /// Create a new PgPriceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRICE_WITH_STORE: &str = r#"
    SELECT
        p.id, p.store_id, p.product_id, p.price, p.currency, p.recorded_at, p.created_at,
        s.name AS store_name,
        s.address AS store_address,
        s.phone AS store_phone,
        ST_Y(s.location::geometry) AS store_latitude,
        ST_X(s.location::geometry) AS store_longitude,
        s.created_at AS store_created_at,
        s.updated_at AS store_updated_at
    FROM prices p
    JOIN stores s ON s.id = p.store_id
"#;

const PRICE_WITH_PRODUCT: &str = r#"
    SELECT
        p.id, p.store_id, p.product_id, p.price, p.currency, p.recorded_at, p.created_at,
        pr.name AS product_name,
        pr.category AS product_category,
        pr.barcode AS product_barcode,
        pr.created_at AS product_created_at
    FROM prices p
    JOIN products pr ON pr.id = p.product_id
"#;

#[derive(FromRow)]
struct PriceWithStoreRow {
    id: i64,
    store_id: i64,
    product_id: i64,
    price: Decimal,
    currency: String,
    recorded_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    store_name: String,
    store_address: String,
    store_phone: Option<String>,
    store_latitude: f64,
    store_longitude: f64,
    store_created_at: DateTime<Utc>,
    store_updated_at: DateTime<Utc>,
}

impl From<PriceWithStoreRow> for Price {
    fn from(row: PriceWithStoreRow) -> Self {
        let store = Store {
            id: row.store_id,
            name: row.store_name,
            address: row.store_address,
            phone: row.store_phone,
            latitude: row.store_latitude,
            longitude: row.store_longitude,
            distance: None,
            min_price: None,
            created_at: row.store_created_at,
            updated_at: row.store_updated_at,
        };
        Price {
            id: row.id,
            store_id: row.store_id,
            product_id: row.product_id,
            price: row.price,
            currency: row.currency,
            recorded_at: row.recorded_at,
            created_at: row.created_at,
            store: Some(store),
            product: None,
        }
    }
}

#[derive(FromRow)]
struct PriceWithProductRow {
    id: i64,
    store_id: i64,
    product_id: i64,
    price: Decimal,
    currency: String,
    recorded_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    product_name: String,
    product_category: String,
    product_barcode: String,
    product_created_at: DateTime<Utc>,
}

impl From<PriceWithProductRow> for Price {
    fn from(row: PriceWithProductRow) -> Self {
        let product = Product {
            id: row.product_id,
            name: row.product_name,
            category: row.product_category,
            barcode: row.product_barcode,
            created_at: row.product_created_at,
        };
        Price {
            id: row.id,
            store_id: row.store_id,
            product_id: row.product_id,
            price: row.price,
            currency: row.currency,
            recorded_at: row.recorded_at,
            created_at: row.created_at,
            store: None,
            product: Some(product),
        }
    }
}

fn push_order_and_page(
    qb: &mut QueryBuilder<'static, Postgres>,
    sort: &Sort<PriceSortField>,
    page: &Page,
) {
    qb.push(" ORDER BY ")
        .push(sort.field.column())
        .push(" ")
        .push(sort.order.as_sql())
        .push(", p.id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
}

fn by_product_query(shape: &ProductPricesShape) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(PRICE_WITH_STORE);
    qb.push(" WHERE p.product_id = ").push_bind(shape.product_id);
    push_order_and_page(&mut qb, &shape.sort, &shape.page);
    qb
}

fn by_store_query(shape: &StorePricesShape) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(PRICE_WITH_PRODUCT);
    qb.push(" WHERE p.store_id = ").push_bind(shape.store_id);
    if let Some(category) = &shape.category {
        qb.push(" AND pr.category = ").push_bind(category.clone());
    }
    push_order_and_page(&mut qb, &shape.sort, &shape.page);
    qb
}

fn recent_query(shape: &RecentPricesShape) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(PRICE_WITH_PRODUCT);
    qb.push(" WHERE p.store_id = ANY(")
        .push_bind(shape.store_ids.clone())
        .push(") ORDER BY p.recorded_at DESC, p.id DESC LIMIT ")
        .push_bind(shape.limit);
    qb
}

#[async_trait]
impl PriceReader for PgPriceRepository {
    async fn by_product(&self, shape: &ProductPricesShape) -> RepoResult<Vec<Price>> {
        let rows = by_product_query(shape)
            .build_query_as::<PriceWithStoreRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Price::from).collect())
    }

    async fn by_store(&self, shape: &StorePricesShape) -> RepoResult<Vec<Price>> {
        let rows = by_store_query(shape)
            .build_query_as::<PriceWithProductRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Price::from).collect())
    }

    async fn recent_for_stores(&self, shape: &RecentPricesShape) -> RepoResult<Vec<Price>> {
        if shape.store_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = recent_query(shape)
            .build_query_as::<PriceWithProductRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Price::from).collect())
    }

    async fn statistics(
        &self,
        plan: &PriceStatsPlan,
    ) -> RepoResult<(PriceSummary, Vec<DailyPriceStats>)> {
        let mut summary_query = plan.summary_query();
        debug!(sql = summary_query.sql(), "Executing price summary");
        let summary = summary_query
            .build_query_as::<PriceSummary>()
            .fetch_one(&self.pool)
            .await?;

        let daily = plan
            .daily_query()
            .build_query_as::<DailyPriceStats>()
            .fetch_all(&self.pool)
            .await?;

        Ok((summary, daily))
    }
}
