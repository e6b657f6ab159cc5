use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::collectors::limiter::RateLimiter;
use crate::collectors::paginator::RetryPolicy;
use crate::collectors::{ScraperSettings, Source};
use crate::error::ConfigError;

const PREFERENCES_FILE: &str = ".jobmatch_config.json";

#[derive(Parser, Debug, Clone)]
#[command(name = "jobmatch", about = "Find job listings matching the skills in your résumé")]
pub struct Config {
    /// Preferences file (defaults to ~/.jobmatch_config.json)
    #[arg(long, env = "JOBMATCH_CONFIG", global = true)]
    pub preferences: Option<PathBuf>,

    /// Base delay between page requests, in seconds
    #[arg(long, env = "JOBMATCH_DELAY", default_value = "1.5", global = true)]
    pub delay: f64,

    /// Request timeout in seconds
    #[arg(long, env = "JOBMATCH_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,

    /// Retries for transient fetch failures (0 stops at the first failure)
    #[arg(long, env = "JOBMATCH_RETRIES", default_value = "0", global = true)]
    pub retries: u32,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the skills detected in a résumé
    Keywords {
        /// Résumé in PDF format
        resume: PathBuf,
    },
    /// Search job listings for résumé skills and/or explicit keywords
    Search {
        /// Résumé in PDF format
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Extra keyword to search for (repeatable)
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,

        /// Location to search in (repeatable, overrides preferences)
        #[arg(long = "location", short = 'l')]
        locations: Vec<String>,

        /// Maximum jobs per keyword and location
        #[arg(long)]
        limit: Option<usize>,

        /// Job type filter code, e.g. F, C, P, T, I (repeatable)
        #[arg(long = "job-type")]
        job_types: Vec<String>,

        /// Experience level filter code (repeatable)
        #[arg(long = "experience")]
        experience_levels: Vec<String>,

        #[arg(long, value_enum, default_value_t = Source::Linkedin)]
        source: Source,

        /// Save results as JSON to this path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Display a previously saved result file
    Show {
        file: PathBuf,
    },
}

impl Config {
    pub fn scraper_settings(&self) -> ScraperSettings {
        ScraperSettings {
            limiter: RateLimiter::with_base(Duration::from_secs_f64(self.delay.max(0.0))),
            timeout: Duration::from_secs(self.timeout),
            retry: RetryPolicy {
                max_retries: self.retries,
            },
        }
    }

    /// Resolve the preferences path, falling back to the home directory.
    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences.clone().or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(PREFERENCES_FILE))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Preferences {
    pub scraper_options: ScraperOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperOptions {
    pub max_jobs_per_keyword: usize,
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub experience_levels: Vec<String>,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            max_jobs_per_keyword: 8,
            locations: vec!["Remote".to_string()],
            job_types: vec![String::new()],
            experience_levels: vec![String::new()],
        }
    }
}

impl Preferences {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load preferences, keeping the defaults when the file is absent or bad.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!("No preferences at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring preferences: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let prefs = Preferences::load_or_default(Some(Path::new("/nonexistent/prefs.json")));
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.scraper_options.max_jobs_per_keyword, 8);
        assert_eq!(prefs.scraper_options.locations, ["Remote"]);
    }

    #[test]
    fn malformed_file_keeps_defaults() {
        let file = write("{ not json");
        assert!(matches!(
            Preferences::load(file.path()),
            Err(ConfigError::Malformed { .. })
        ));
        assert_eq!(
            Preferences::load_or_default(Some(file.path())),
            Preferences::default()
        );
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let file = write(r#"{"scraper_options": {"max_jobs_per_keyword": 3, "locations": ["Berlin", "Remote"]}}"#);
        let options = Preferences::load_or_default(Some(file.path())).scraper_options;
        assert_eq!(options.max_jobs_per_keyword, 3);
        assert_eq!(options.locations, ["Berlin", "Remote"]);
        assert_eq!(options.job_types, [""]);
    }

    #[test]
    fn cli_flags_build_scraper_settings() {
        let config = Config::parse_from([
            "jobmatch",
            "--delay",
            "2",
            "--retries",
            "2",
            "search",
            "-k",
            "Rust",
            "--source",
            "both",
        ]);
        let settings = config.scraper_settings();
        assert_eq!(settings.retry.max_retries, 2);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.limiter.next_delay() >= Duration::from_secs(2));
        match config.command {
            Command::Search {
                keywords, source, ..
            } => {
                assert_eq!(keywords, ["Rust"]);
                assert_eq!(source, Source::Both);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
