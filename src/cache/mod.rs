// Cache module for enrichment results.
// Keeps enriched repositories in memory so repeated requests skip the languages endpoint.

pub mod store;

pub use store::{CacheEntry, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL, EnrichmentCache};
