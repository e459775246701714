// Service configuration.
// Command-line flags with environment fallbacks, validated once at startup.

use std::time::Duration;

use clap::Parser;

use crate::cache::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
use crate::error::{RepoStatsError, Result};
use crate::github::GITHUB_API_BASE;

/// Command-line arguments for repostats.
#[derive(Parser, Debug, Clone)]
#[command(name = "repostats")]
#[command(about = "Lists recently updated GitHub repositories and their language statistics")]
#[command(version)]
pub struct Config {
    /// GitHub token used as a bearer credential for every API call
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "REPOSTATS_PORT")]
    pub port: u16,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = GITHUB_API_BASE, env = "GITHUB_API_URL")]
    pub api_base: String,

    /// Repositories requested per search (GitHub allows at most 100)
    #[arg(long, default_value_t = 50, env = "REPOSTATS_PER_PAGE")]
    pub per_page: u32,

    /// Seconds an enriched repository stays cached
    #[arg(long, default_value_t = DEFAULT_TTL.as_secs(), env = "REPOSTATS_CACHE_TTL_SECS")]
    pub cache_ttl_secs: u64,

    /// Seconds between sweeps of expired cache entries
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL.as_secs(), env = "REPOSTATS_CACHE_SWEEP_SECS")]
    pub cache_sweep_secs: u64,

    /// Deadline in seconds for each outbound GitHub request
    #[arg(long, default_value_t = 10, env = "REPOSTATS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Maximum concurrent language fetches (0 = one per repository on the page)
    #[arg(long, default_value_t = 0, env = "REPOSTATS_MAX_CONCURRENCY")]
    pub max_concurrency: usize,
}

impl Config {
    /// Check required values and ranges, returning the token on success.
    pub fn validate(&self) -> Result<&str> {
        let token = self
            .github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RepoStatsError::MissingToken)?;

        if !(1..=100).contains(&self.per_page) {
            return Err(RepoStatsError::Config(format!(
                "per_page must be between 1 and 100, got {}",
                self.per_page
            )));
        }
        if self.cache_ttl_secs == 0 {
            return Err(RepoStatsError::Config(
                "cache_ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.cache_sweep_secs == 0 {
            return Err(RepoStatsError::Config(
                "cache_sweep_secs must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(RepoStatsError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(token)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
