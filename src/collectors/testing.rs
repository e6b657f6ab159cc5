use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::collectors::fetcher::{Page, PageFetcher};
use crate::error::FetchError;

/// Replays canned responses in order and records every requested URL.
/// Once the script runs out every fetch returns 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Page, FetchError>>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, body: impl Into<String>) -> Self {
        self.push(Ok(Page {
            status: StatusCode::OK,
            body: body.into(),
        }))
    }

    pub fn status(self, status: StatusCode) -> Self {
        self.push(Err(FetchError::Status(status)))
    }

    fn push(self, response: Result<Page, FetchError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Status(StatusCode::NOT_FOUND)))
    }
}

/// A listing page with `count` valid cards whose ids start at `first_id`.
pub fn listing_page(first_id: u32, count: u32) -> String {
    (first_id..first_id + count)
        .map(|id| {
            format!(
                r#"<li><a class="base-card__full-link" href="/jobs/view/{id}">Job {id}</a>
                   <h4 class="base-search-card__subtitle">Company {id}</h4></li>"#
            )
        })
        .collect()
}
