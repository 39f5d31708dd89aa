use crate::error::{SearchError, SearchResult};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated search request. `text` is trimmed and never empty, `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
    pub limit: Option<u32>,
}

impl SearchQuery {
    /// Validates raw query-string values. All three arrive as strings from the URL.
    pub fn parse(q: Option<&str>, page: Option<&str>, limit: Option<&str>) -> SearchResult<Self> {
        let text = q.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(SearchError::validation("Query parameter is required"));
        }

        let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => parse_page(raw)?,
            None => 1,
        };

        let limit = match limit.map(str::trim).filter(|l| !l.is_empty()) {
            Some(raw) => Some(parse_limit(raw)?),
            None => None,
        };

        Ok(Self {
            text: text.to_string(),
            page,
            limit,
        })
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit.unwrap_or(DEFAULT_PAGE_SIZE))
    }
}

fn parse_page(raw: &str) -> SearchResult<u32> {
    let page: i64 = raw
        .parse()
        .map_err(|_| SearchError::validation("Page must be an integer"))?;
    if page < 1 {
        return Err(SearchError::validation("Page must be greater than 0"));
    }
    u32::try_from(page).map_err(|_| SearchError::validation("Page is out of range"))
}

fn parse_limit(raw: &str) -> SearchResult<u32> {
    let limit: i64 = raw
        .parse()
        .map_err(|_| SearchError::validation("Limit must be an integer"))?;
    if !(1..=i64::from(MAX_PAGE_SIZE)).contains(&limit) {
        return Err(SearchError::validation(format!(
            "Limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(limit as u32)
}

/// A pagination window. Always `page >= 1` and `page_size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn take(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Number of items this window holds when `total` items match.
    pub fn window_len(&self, total: u64) -> u64 {
        total.saturating_sub(self.skip()).min(self.take())
    }
}
