// repostats library.
// Searches GitHub for recently updated repositories, enriches them with language
// breakdowns through a TTL cache, and aggregates language totals.

pub mod api;
pub mod cache;
pub mod config;
pub mod enrich;
pub mod error;
pub mod github;
pub mod query;
pub mod service;
pub mod stats;

pub use api::{AppState, build_router};
pub use cache::EnrichmentCache;
pub use config::Config;
pub use enrich::LanguageEnricher;
pub use error::{RepoStatsError, Result};
pub use query::{QueryFilter, build_query};
pub use service::RepoStatsService;
pub use stats::{LanguageStats, aggregate};
