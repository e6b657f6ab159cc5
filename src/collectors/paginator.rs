use crate::collectors::fetcher::{Page, PageFetcher};
use crate::collectors::limiter::RateLimiter;
use crate::collectors::parser::ListingParser;
use crate::error::FetchError;
use crate::models::job::JobRecord;

/// Number of listings the upstream site serves per page.
pub const PAGE_SIZE: usize = 25;

/// How many times a transient failure is retried before the page counts
/// as failed. Zero stops on the first failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    LimitReached,
    FetchFailed,
    EmptyPage,
}

#[derive(Debug)]
pub struct Pagination {
    pub records: Vec<JobRecord>,
    pub pages_fetched: usize,
    pub stop: StopReason,
}

/// Drives fetch → parse → accumulate over an offset cursor.
pub struct Paginator<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub parser: &'a ListingParser,
    pub limiter: RateLimiter,
    pub retry: RetryPolicy,
}

impl Paginator<'_> {
    /// `page_url` receives the result offset of the page to fetch.
    pub async fn run<F>(&self, keyword: &str, limit: usize, page_url: F) -> Pagination
    where
        F: Fn(usize) -> String + Sync,
    {
        let mut records = Vec::new();
        let mut page = 0;

        let stop = loop {
            if records.len() >= limit {
                break StopReason::LimitReached;
            }
            if page > 0 {
                self.limiter.wait().await;
            }

            let url = page_url(page * PAGE_SIZE);
            let body = match self.fetch_with_retry(&url).await {
                Ok(p) => {
                    tracing::debug!("Fetched page {page} for '{keyword}' ({})", p.status);
                    p.body
                }
                Err(e) => {
                    tracing::warn!("Stopping '{keyword}' at page {page}: {e}");
                    break StopReason::FetchFailed;
                }
            };
            page += 1;

            let parsed = self.parser.parse(&body, keyword);
            if parsed.is_empty() {
                break StopReason::EmptyPage;
            }
            records.extend(parsed);
        };

        records.truncate(limit);
        Pagination {
            records,
            pages_fetched: page,
            stop,
        }
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<Page, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::info!(
                        "Retrying {url} ({attempt}/{}): {e}",
                        self.retry.max_retries
                    );
                    self.limiter.wait().await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
