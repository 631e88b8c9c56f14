pub mod price_service;
pub mod product_service;
pub mod read_through;
pub mod requests;
pub mod store_service;

pub use price_service::PriceService;
pub use product_service::ProductService;
pub use read_through::ReadThrough;
pub use requests::{
    NearbyOptions, PriceListOptions, ProductListOptions, ProductSearchOptions, StatsOptions,
    StoreListOptions, StorePriceListOptions,
};
pub use store_service::StoreService;

use crate::error::{AppError, AppResult};
use crate::query::{Bounds, GeoPoint};
use crate::repositories::RepoResult;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Await a repository call, failing with a retryable timeout past `deadline`
pub(crate) async fn bounded<T, F>(operation: &str, deadline: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => {
            warn!(operation, ?deadline, "query timed out");
            Err(AppError::Timeout(operation.to_string()))
        }
    }
}

pub(crate) fn require_positive_id(id: i64, what: &str) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "{} id must be positive, got {}",
            what, id
        )));
    }
    Ok(())
}

pub(crate) fn require_valid_point(point: &GeoPoint, what: &str) -> AppResult<()> {
    if !point.is_valid() {
        return Err(AppError::InvalidArgument(format!(
            "{} is out of range: lat={}, lon={}",
            what, point.lat, point.lon
        )));
    }
    Ok(())
}

pub(crate) fn require_valid_bounds(bounds: &Bounds) -> AppResult<()> {
    if !bounds.is_valid() {
        return Err(AppError::InvalidArgument(format!(
            "bounding box is invalid: {:?}",
            bounds
        )));
    }
    Ok(())
}
