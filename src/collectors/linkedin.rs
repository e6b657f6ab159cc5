use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::collectors::fetcher::{HttpFetcher, PageFetcher};
use crate::collectors::paginator::{Paginator, StopReason};
use crate::collectors::parser::{CardSelectors, ListingParser};
use crate::collectors::{JobCollector, ScraperSettings};
use crate::error::AppError;
use crate::models::job::{JobRecord, SearchQuery};

/// Characters Python's `urllib.parse.quote` leaves alone:
/// A-Z a-z 0-9 - _ . ~ and the path separator.
pub(crate) const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

const BASE_URL: &str = "https://www.linkedin.com";
const SEARCH_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// Paginated scraper for the public LinkedIn job search.
pub struct LinkedIn {
    parser: ListingParser,
    settings: ScraperSettings,
}

#[async_trait]
impl JobCollector for LinkedIn {
    fn name(&self) -> &str {
        "linkedin"
    }

    async fn search(&self, query: &SearchQuery) -> Vec<JobRecord> {
        // One session per search; sessions are never shared.
        let session = match HttpFetcher::new(&format!("{BASE_URL}/"), self.settings.timeout) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Cannot open LinkedIn session: {e}");
                return Vec::new();
            }
        };
        self.search_with(&session, query).await
    }
}

impl LinkedIn {
    pub fn new(settings: ScraperSettings) -> Result<Self, AppError> {
        Self::with_selectors(settings, &CardSelectors::linkedin())
    }

    pub fn with_selectors(
        settings: ScraperSettings,
        selectors: &CardSelectors,
    ) -> Result<Self, AppError> {
        Ok(Self {
            parser: ListingParser::new(selectors)?,
            settings,
        })
    }

    pub async fn search_with(&self, fetcher: &dyn PageFetcher, query: &SearchQuery) -> Vec<JobRecord> {
        let paginator = Paginator {
            fetcher,
            parser: &self.parser,
            limiter: self.settings.limiter,
            retry: self.settings.retry,
        };

        let outcome = paginator
            .run(&query.keyword, query.limit, |start| page_url(query, start))
            .await;

        match outcome.stop {
            StopReason::FetchFailed if outcome.records.is_empty() => tracing::warn!(
                "LinkedIn search for '{}' failed before any results",
                query.keyword
            ),
            stop => tracing::info!(
                "LinkedIn '{}': {} jobs from {} pages ({stop:?})",
                query.keyword,
                outcome.records.len(),
                outcome.pages_fetched
            ),
        }

        outcome.records
    }
}

/// Build the search URL for the page starting at result offset `start`.
fn page_url(query: &SearchQuery, start: usize) -> String {
    let mut url = format!(
        "{BASE_URL}{SEARCH_PATH}?keywords={}",
        urlencoded(&query.keyword)
    );
    if let Some(location) = &query.location {
        url.push_str(&format!("&location={}", urlencoded(location)));
    }
    url.push_str(&format!("&start={start}"));
    if let Some(job_type) = &query.job_type {
        url.push_str(&format!("&f_JT={job_type}"));
    }
    if let Some(level) = &query.experience_level {
        url.push_str(&format!("&f_E={level}"));
    }
    url
}

pub(crate) fn urlencoded(s: &str) -> String {
    utf8_percent_encode(s, QUERY_VALUE_SET).to_string()
}
