//! Page-number pagination for list endpoints
//!
//! GitHub list endpoints take `per_page` and a 1-indexed `page`. A listing is
//! complete when a page comes back empty, or when an optional page ceiling is
//! reached.

use std::future::Future;

use log::debug;

use crate::error::Result;

/// Page size used for every GitHub listing (the API maximum)
pub const GITHUB_PAGE_SIZE: usize = 100;

/// Hard ceiling on repository listing pages.
///
/// Organizations with more than `GITHUB_PAGE_SIZE * MAX_REPO_PAGES` repositories
/// are truncated silently.
pub const MAX_REPO_PAGES: usize = 10;

/// How far a paginated listing may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    /// Items requested per page
    pub per_page: usize,
    /// Stop after this many pages even if more data exists
    pub max_pages: Option<usize>,
}

impl PageLimit {
    /// Fetch until an empty page.
    pub fn unbounded(per_page: usize) -> Self {
        Self {
            per_page,
            max_pages: None,
        }
    }

    /// Fetch until an empty page or `max_pages` pages, whichever comes first.
    pub fn capped(per_page: usize, max_pages: usize) -> Self {
        Self {
            per_page,
            max_pages: Some(max_pages),
        }
    }
}

/// Parameters for a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// 1-indexed page number
    pub page: usize,
    /// Items per page
    pub per_page: usize,
}

impl PaginationParams {
    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Walk pages in order, concatenating items until the listing is exhausted.
///
/// `fetch_page` is awaited once per page; errors propagate immediately and
/// discard anything collected so far.
pub async fn collect_pages<T, F, Fut>(limit: PageLimit, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch_page(PaginationParams {
            page,
            per_page: limit.per_page,
        })
        .await?;

        if batch.is_empty() {
            break;
        }

        debug!("Page {} returned {} items", page, batch.len());
        items.extend(batch);

        if limit.max_pages.is_some_and(|max| page >= max) {
            debug!("Stopping at page ceiling ({} pages)", page);
            break;
        }
        page += 1;
    }

    Ok(items)
}
