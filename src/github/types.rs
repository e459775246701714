// GitHub API response types.
// Defines the repository search page and the per-repository language breakdown.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language name to byte count, as returned by `GET /repos/{owner}/{repo}/languages`.
pub type Languages = BTreeMap<String, u64>;

/// A repository from the search endpoint, optionally enriched with its languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub git_url: String,
    pub html_url: String,
    pub languages_url: String,
    pub created_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    /// Primary language as reported by GitHub.
    #[serde(rename = "language")]
    pub main_language: Option<String>,
    /// Filled in by enrichment; absent from search responses.
    #[serde(default)]
    pub languages: Languages,
}

/// One page of `GET /search/repositories`, items in API order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<RepositoryRecord>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
