//! Limit/offset normalization.
//!
//! Out-of-range pagination is silently corrected, never rejected.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Requested pagination, exactly as received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

/// Normalized pagination: `limit` in `[1, max]`, `offset >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Default and maximum page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl PageLimits {
    pub fn normalize_limit(&self, requested: i64) -> i64 {
        if requested <= 0 {
            self.default_limit
        } else if requested > self.max_limit {
            self.max_limit
        } else {
            requested
        }
    }

    pub fn normalize(&self, requested: Pagination) -> Page {
        Page {
            limit: self.normalize_limit(requested.limit),
            offset: normalize_offset(requested.offset),
        }
    }
}

pub fn normalize_offset(requested: i64) -> i64 {
    requested.max(0)
}
