// Language statistics aggregation.
// Sums per-language byte counts across enriched repositories.

use serde::{Deserialize, Serialize};

use crate::github::{Languages, RepositoryRecord};

/// Total bytes per language across a set of repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub languages: Languages,
}

impl LanguageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one repository's language breakdown to the totals.
    pub fn add(&mut self, languages: &Languages) {
        for (language, bytes) in languages {
            let total = self.languages.entry(language.clone()).or_insert(0);
            *total = total.saturating_add(*bytes);
        }
    }

    /// Fold another partial result into this one.
    pub fn merge(mut self, other: LanguageStats) -> Self {
        self.add(&other.languages);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Aggregate language totals over `records`.
///
/// Order of `records` does not affect the result; partial aggregates over any
/// split of the input combine to the same totals via [`LanguageStats::merge`].
pub fn aggregate(records: &[RepositoryRecord]) -> LanguageStats {
    records.iter().fold(LanguageStats::new(), |mut stats, record| {
        stats.add(&record.languages);
        stats
    })
}
