/// Default number of rows per page when `limit` is missing or malformed.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Row window over a stably ordered result.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Page { limit, offset }
    }

    /// Builds a window from raw `limit`/`page` query values.
    ///
    /// Non-integer or missing values fall back to the defaults (limit 20,
    /// page 1), `limit` is clamped to `[1, 100]`, `page` below 1 becomes 1 and
    /// `offset = limit * (page - 1)`.
    pub fn from_query(limit: Option<&str>, page: Option<&str>) -> Self {
        let limit = limit
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT as i64)
            .clamp(1, MAX_PAGE_LIMIT as i64) as u32;

        let page = page
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1) as u64;

        let offset = (limit as u64)
            .saturating_mul(page - 1)
            .min(u32::MAX as u64) as u32;

        Page { limit, offset }
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_PAGE_LIMIT).contains(&self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(DEFAULT_PAGE_LIMIT, 0)
    }
}
