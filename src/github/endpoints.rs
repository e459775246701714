// GitHub API endpoint functions.
// Typed methods for the repository search and per-repository languages endpoints.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Languages, SearchResult};

impl GitHubClient {
    /// Search repositories, most recently updated first.
    ///
    /// `query` is a pre-assembled search fragment (see [`crate::query::build_query`]);
    /// it is placed into the URL as-is, so its `%20` separators are not re-encoded.
    pub async fn search_repositories(&self, query: &str, per_page: u32) -> Result<SearchResult> {
        let url = format!(
            "{}/search/repositories?q={}&sort=updated&order=desc&per_page={}",
            self.base_url(),
            query,
            per_page
        );
        let result: SearchResult = self.get_json(&url).await?;
        tracing::debug!(
            total_count = result.total_count,
            items = result.items.len(),
            "Fetched repository search page"
        );
        Ok(result)
    }

    /// Get the language breakdown (bytes per language) from a repository's `languages_url`.
    pub async fn get_languages(&self, languages_url: &str) -> Result<Languages> {
        self.get_json(languages_url).await
    }
}
