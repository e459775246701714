// Repository listing and statistics pipeline.
// Wires filter building, the search call, enrichment, and aggregation together.

use std::sync::Arc;
use std::time::Instant;

use crate::cache::EnrichmentCache;
use crate::config::Config;
use crate::enrich::LanguageEnricher;
use crate::error::Result;
use crate::github::{GitHubClient, SearchResult};
use crate::query::{QueryFilter, build_query};
use crate::stats::{LanguageStats, aggregate};

/// Entry point for the two operations exposed over HTTP.
#[derive(Clone)]
pub struct RepoStatsService {
    client: Arc<GitHubClient>,
    enricher: LanguageEnricher,
    per_page: u32,
}

impl RepoStatsService {
    pub fn new(client: Arc<GitHubClient>, cache: EnrichmentCache, per_page: u32) -> Self {
        let enricher = LanguageEnricher::new(client.clone(), cache);
        Self {
            client,
            enricher,
            per_page,
        }
    }

    /// Build the client and cache described by `config`.
    ///
    /// Must be called inside a tokio runtime; it starts the cache sweeper.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.validate()?;
        let client = Arc::new(GitHubClient::new(
            token,
            &config.api_base,
            config.request_timeout(),
        )?);

        let cache = EnrichmentCache::new(config.cache_ttl());
        cache.spawn_sweeper(config.cache_sweep_interval());

        let enricher =
            LanguageEnricher::new(client.clone(), cache).with_max_concurrency(config.max_concurrency);
        Ok(Self {
            client,
            enricher,
            per_page: config.per_page,
        })
    }

    pub fn cache(&self) -> &EnrichmentCache {
        self.enricher.cache()
    }

    /// Fetch the most recently updated repositories matching `filter`, with languages.
    pub async fn list_repositories(&self, filter: &QueryFilter) -> Result<SearchResult> {
        let start = Instant::now();
        let query = build_query(filter);

        let page = self.client.search_repositories(&query, self.per_page).await?;
        let enriched = self.enricher.enrich(page).await?;

        tracing::info!(
            query = %query,
            items = enriched.items.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Listed repositories"
        );
        Ok(enriched)
    }

    /// Aggregate language byte counts over the repositories matching `filter`.
    pub async fn compute_stats(&self, filter: &QueryFilter) -> Result<LanguageStats> {
        let result = self.list_repositories(filter).await?;
        let stats = aggregate(&result.items);
        tracing::debug!(languages = stats.languages.len(), "Aggregated language stats");
        Ok(stats)
    }
}
