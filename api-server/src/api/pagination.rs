//! 分页参数
//!
//! Each listing endpoint declares its own default page size and ordering
//! (no process-wide defaults); this module only resolves the common
//! `page` / `limit` query parameters.

use serde::Deserialize;

/// Hard cap on client-supplied page sizes
pub const MAX_PAGE_SIZE: u32 = 100;

/// Common `page` / `limit` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolve to (page, limit) using the endpoint's default page size
    pub fn resolve(&self, default_limit: u32) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }

    /// Row offset for a resolved (page, limit) pair
    pub fn offset(page: u32, limit: u32) -> i64 {
        ((page - 1) as i64) * (limit as i64)
    }
}
