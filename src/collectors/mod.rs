// Job source collectors and the runner that fans keywords out over them.

pub mod fetcher;
pub mod indeed;
pub mod limiter;
pub mod linkedin;
pub mod paginator;
pub mod parser;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::collectors::fetcher::DEFAULT_TIMEOUT;
use crate::collectors::limiter::RateLimiter;
use crate::collectors::paginator::RetryPolicy;
use crate::error::AppError;
use crate::models::job::{JobRecord, SearchQuery};

/// Trait that all job collectors must implement.
///
/// `search` never fails: network and markup problems degrade to fewer
/// (possibly zero) records. The returned sequence holds at most
/// `query.limit` records.
#[async_trait]
pub trait JobCollector: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    async fn search(&self, query: &SearchQuery) -> Vec<JobRecord>;
}

/// Network behaviour shared by the scraping collectors.
#[derive(Debug, Clone, Copy)]
pub struct ScraperSettings {
    pub limiter: RateLimiter,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            limiter: RateLimiter::default(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Linkedin,
    Indeed,
    Both,
}

/// Collectors for the selected source, in the order results are merged.
pub fn collectors_for(
    source: Source,
    settings: ScraperSettings,
) -> Result<Vec<Arc<dyn JobCollector>>, AppError> {
    let mut collectors: Vec<Arc<dyn JobCollector>> = Vec::new();
    if matches!(source, Source::Linkedin | Source::Both) {
        collectors.push(Arc::new(linkedin::LinkedIn::new(settings)?));
    }
    if matches!(source, Source::Indeed | Source::Both) {
        collectors.push(Arc::new(indeed::Indeed));
    }
    Ok(collectors)
}
