// Indeed blocks plain HTTP scraping, so this collector only hands back a
// ready-made search link for the user to open.

use async_trait::async_trait;
use chrono::Utc;

use crate::collectors::JobCollector;
use crate::collectors::linkedin::urlencoded;
use crate::models::job::{JobRecord, SearchQuery};

pub const FALLBACK_JOB_ID: &str = "indeed-fallback";

const BASE_URL: &str = "https://www.indeed.com";

pub struct Indeed;

#[async_trait]
impl JobCollector for Indeed {
    fn name(&self) -> &str {
        "indeed"
    }

    async fn search(&self, query: &SearchQuery) -> Vec<JobRecord> {
        if query.limit == 0 {
            return Vec::new();
        }

        let location = query.location.as_deref().unwrap_or_default();
        let url = format!(
            "{BASE_URL}/jobs?q={}&l={}",
            urlencoded(&query.keyword),
            urlencoded(location)
        );

        vec![JobRecord {
            keyword: query.keyword.clone(),
            job_id: FALLBACK_JOB_ID.to_string(),
            title: format!("Search {} jobs on Indeed", query.keyword),
            company: "Indeed".to_string(),
            location: query
                .location
                .clone()
                .unwrap_or_else(|| "Various locations".to_string()),
            url,
            date_posted: String::new(),
            scrape_time: Utc::now(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_returns_a_single_search_link() {
        let query = SearchQuery::new("Rust", 5).with_location("Berlin");
        let records = Indeed.search(&query).await;

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.job_id, FALLBACK_JOB_ID);
        assert_eq!(record.url, "https://www.indeed.com/jobs?q=Rust&l=Berlin");
        assert_eq!(record.title, "Search Rust jobs on Indeed");
        assert_eq!(record.location, "Berlin");
        assert_eq!(record.date_posted, "");
    }

    #[tokio::test]
    async fn missing_location_leaves_parameter_empty() {
        let records = Indeed.search(&SearchQuery::new("Node.js", 8)).await;
        assert_eq!(records[0].url, "https://www.indeed.com/jobs?q=Node.js&l=");
        assert_eq!(records[0].location, "Various locations");
    }

    #[tokio::test]
    async fn zero_limit_returns_nothing() {
        assert!(Indeed.search(&SearchQuery::new("Rust", 0)).await.is_empty());
    }
}
