// Error types for repostats.
// Covers configuration, GitHub API transport/status/decode failures and cache errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoStatsError {
    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cache serialization error: {0}")]
    Cache(#[source] serde_json::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Enrichment task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepoStatsError {
    /// Whether the failure came from talking to GitHub (as opposed to local state).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RepoStatsError::Transport(_)
                | RepoStatsError::Unauthorized
                | RepoStatsError::NotFound(_)
                | RepoStatsError::RateLimited { .. }
                | RepoStatsError::Upstream { .. }
                | RepoStatsError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RepoStatsError>;
