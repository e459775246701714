// Language enrichment for repository search results.
// Fans out one task per repository, consulting the cache before calling the languages endpoint.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::cache::EnrichmentCache;
use crate::error::{RepoStatsError, Result};
use crate::github::{GitHubClient, RepositoryRecord, SearchResult};

/// Fills in each record's `languages`, cache first, GitHub second.
#[derive(Clone)]
pub struct LanguageEnricher {
    client: Arc<GitHubClient>,
    cache: EnrichmentCache,
    limiter: Option<Arc<Semaphore>>,
}

impl LanguageEnricher {
    pub fn new(client: Arc<GitHubClient>, cache: EnrichmentCache) -> Self {
        Self {
            client,
            cache,
            limiter: None,
        }
    }

    /// Cap the number of enrichment tasks in flight at once. Zero means no cap.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.limiter = (max > 0).then(|| Arc::new(Semaphore::new(max)));
        self
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    /// Enrich every record of `result`, preserving item order.
    ///
    /// Each record moves into its own task and comes back through that task's
    /// handle, so no two tasks ever touch the same record. Every task is awaited
    /// before this returns. If any record fails, the whole batch fails with the
    /// error of the first failing record; records that did succeed stay cached.
    pub async fn enrich(&self, result: SearchResult) -> Result<SearchResult> {
        let SearchResult { total_count, items } = result;

        let handles: Vec<_> = items
            .into_iter()
            .map(|record| {
                let this = self.clone();
                tokio::spawn(async move { this.enrich_one(record).await })
            })
            .collect();

        let mut enriched = Vec::with_capacity(handles.len());
        let mut first_error = None;
        for handle in handles {
            let outcome = handle
                .await
                .map_err(|e| RepoStatsError::Task(e.to_string()))
                .and_then(|r| r);
            match outcome {
                Ok(record) => enriched.push(record),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        Ok(SearchResult {
            total_count,
            items: enriched,
        })
    }

    /// Cache-aside enrichment of a single record.
    async fn enrich_one(&self, mut record: RepositoryRecord) -> Result<RepositoryRecord> {
        if let Some(cached) = self.cache.get::<RepositoryRecord>(&record.full_name) {
            tracing::debug!(repo = %record.full_name, "Cache hit");
            return Ok(cached);
        }

        let _permit = match &self.limiter {
            Some(limiter) => Some(
                limiter
                    .acquire()
                    .await
                    .map_err(|e| RepoStatsError::Task(e.to_string()))?,
            ),
            None => None,
        };

        tracing::debug!(repo = %record.full_name, "Fetching languages");
        record.languages = self
            .client
            .get_languages(&record.languages_url)
            .await
            .inspect_err(|e| {
                tracing::warn!(repo = %record.full_name, error = %e, "Language fetch failed")
            })?;

        if let Err(e) = self.cache.set(&record.full_name, &record, None) {
            tracing::warn!(repo = %record.full_name, error = %e, "Failed to cache enriched repository");
        }

        Ok(record)
    }
}
