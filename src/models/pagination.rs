use serde::{Deserialize, Serialize};

/// Page/limit pair carried in list request bodies.
/// Defaults: page 1, limit 10. Limit is capped at 100.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Pagination block returned next to every list.
/// Field names follow the wire contract, hence the mixed casing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "totalCount")]
    pub total_count: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    pub current_page: i64,
}

impl Pagination {
    /// Invariant: `total_pages == ceil(total_count / page_size)`.
    pub fn new(total_count: i64, params: &PageParams) -> Self {
        let page_size = params.limit();
        Self {
            page_size,
            total_count,
            total_pages: (total_count + page_size - 1) / page_size,
            current_page: params.page(),
        }
    }
}
