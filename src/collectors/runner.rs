use std::sync::Arc;

use tokio::sync::mpsc;

use crate::collectors::JobCollector;
use crate::models::job::{JobRecord, SearchQuery};

/// Everything one collection run searches for.
#[derive(Debug, Clone, Default)]
pub struct RunPlan {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub experience_levels: Vec<String>,
    pub limit_per_search: usize,
}

/// Sent once per finished keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub keyword: String,
    pub found: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Run every search in the plan, one after another.
///
/// Results are ordered keyword → location → job type → experience level →
/// collector. Meant to be spawned off the task that talks to the user;
/// progress is reported over `progress` and a closed receiver is ignored.
pub async fn run(
    collectors: Vec<Arc<dyn JobCollector>>,
    plan: RunPlan,
    progress: mpsc::UnboundedSender<Progress>,
) -> Vec<JobRecord> {
    let locations = or_unset(&plan.locations);
    let job_types = or_unset(&plan.job_types);
    let levels = or_unset(&plan.experience_levels);
    let total = plan.keywords.len();

    tracing::info!(
        "Searching {total} keywords across {} collectors",
        collectors.len()
    );

    let mut jobs = Vec::new();
    for (index, keyword) in plan.keywords.iter().enumerate() {
        let before = jobs.len();

        for location in &locations {
            for job_type in &job_types {
                for level in &levels {
                    let query = SearchQuery::new(keyword.as_str(), plan.limit_per_search)
                        .with_location(location)
                        .with_job_type(job_type)
                        .with_experience_level(level);

                    for collector in &collectors {
                        let found = collector.search(&query).await;
                        tracing::debug!(
                            "{} returned {} jobs for '{keyword}'",
                            collector.name(),
                            found.len()
                        );
                        jobs.extend(found);
                    }
                }
            }
        }

        let _ = progress.send(Progress {
            completed: index + 1,
            total,
            keyword: keyword.clone(),
            found: jobs.len() - before,
        });
    }

    tracing::info!("Search complete: {} jobs found", jobs.len());
    jobs
}

/// An empty filter list still means one unfiltered search.
fn or_unset(values: &[String]) -> Vec<String> {
    if values.is_empty() {
        vec![String::new()]
    } else {
        values.to_vec()
    }
}
