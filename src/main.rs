mod collectors;
mod config;
mod display;
mod error;
mod export;
mod models;
mod resume;

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::collectors::runner::{self, RunPlan};
use crate::collectors::{Source, collectors_for};
use crate::config::{Command, Config, Preferences};
use crate::error::AppError;
use crate::models::job::JobRecord;
use crate::resume::keywords::{self, KeywordExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobmatch=info")),
        )
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match config.command.clone() {
        Command::Keywords { resume } => {
            let skills = detect_skills(resume).await?;
            if skills.is_empty() {
                println!("No known skills detected");
            } else {
                println!("{}", skills.join(", "));
            }
        }
        Command::Search {
            resume,
            keywords: extra,
            locations,
            limit,
            job_types,
            experience_levels,
            source,
            output,
        } => {
            let prefs = Preferences::load_or_default(config.preferences_path().as_deref());
            let options = prefs.scraper_options;

            let mut terms = match resume {
                Some(path) => detect_skills(path).await?,
                None => Vec::new(),
            };
            for keyword in &extra {
                keywords::add_keyword(&mut terms, keyword);
            }
            if terms.is_empty() {
                return Err(AppError::BadRequest(
                    "No keywords: pass --resume or at least one --keyword".to_string(),
                )
                .into());
            }
            tracing::info!("Searching for: {}", terms.join(", "));

            let plan = RunPlan {
                keywords: terms,
                locations: prefer_cli(locations, options.locations),
                job_types: prefer_cli(job_types, options.job_types),
                experience_levels: prefer_cli(experience_levels, options.experience_levels),
                limit_per_search: limit.unwrap_or(options.max_jobs_per_keyword),
            };
            let jobs = search(&config, source, plan).await?;

            display::render(&mut std::io::stdout().lock(), &jobs)?;

            if let Some(path) = output {
                match export::save(&jobs, &path) {
                    Ok(()) => println!("Results saved to {}", path.display()),
                    Err(AppError::BadRequest(msg)) => tracing::warn!("{msg}"),
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Command::Show { file } => {
            let jobs = export::load(&file)?;
            display::render(&mut std::io::stdout().lock(), &jobs)?;
        }
    }

    Ok(())
}

async fn detect_skills(path: PathBuf) -> Result<Vec<String>, AppError> {
    tracing::info!("Extracting text from {}...", path.display());
    let text = resume::extract_text_async(path).await?;
    let extractor = KeywordExtractor::with_default_vocabulary()?;
    Ok(extractor.extract_terms(&text).into_iter().collect())
}

/// The collector run happens on its own task; this task only reports progress.
async fn search(
    config: &Config,
    source: Source,
    plan: RunPlan,
) -> anyhow::Result<Vec<JobRecord>> {
    let collectors = collectors_for(source, config.scraper_settings())?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(runner::run(collectors, plan, tx));

    while let Some(progress) = rx.recv().await {
        eprintln!(
            "[{:>3.0}%] {} ({}/{}): {} jobs",
            progress.percent(),
            progress.keyword,
            progress.completed,
            progress.total,
            progress.found
        );
    }

    Ok(worker.await?)
}

/// Values given on the command line replace the stored preferences.
fn prefer_cli(cli: Vec<String>, stored: Vec<String>) -> Vec<String> {
    if cli.is_empty() { stored } else { cli }
}
