use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One discovered listing.
///
/// `url` is always absolute. `job_id` and `date_posted` are empty strings
/// when the source does not expose them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub keyword: String,
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub date_posted: String,
    pub scrape_time: DateTime<Utc>,
}

/// Parameters for a single `search` call. Not retained afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: Option<String>,
    pub limit: usize,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, limit: usize) -> Self {
        Self {
            keyword: keyword.into(),
            location: None,
            limit,
            job_type: None,
            experience_level: None,
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = non_empty(location);
        self
    }

    pub fn with_job_type(mut self, job_type: &str) -> Self {
        self.job_type = non_empty(job_type);
        self
    }

    pub fn with_experience_level(mut self, level: &str) -> Self {
        self.experience_level = non_empty(level);
        self
    }
}

/// Empty filter values mean "not set".
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
