// Search query construction.
// Translates request filters into a GitHub repository search fragment.

use serde::{Deserialize, Serialize};

/// Clause every search starts from; matches all repositories.
pub const DEFAULT_CLAUSE: &str = "stars:>=0";

const SEPARATOR: &str = "%20";

/// Optional filters accepted by the `/repos` and `/stats` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryFilter {
    #[serde(alias = "Owner")]
    pub owner: Option<String>,
    #[serde(alias = "License")]
    pub license: Option<String>,
    #[serde(alias = "Language")]
    pub language: Option<String>,
    /// `owner/name`; takes precedence over `owner`.
    #[serde(alias = "Repository")]
    pub repository: Option<String>,
}

impl QueryFilter {
    fn field(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Build the `q=` fragment for the search endpoint.
///
/// Clause order is fixed: repository or owner, then license, then language.
/// Empty strings count as unset.
///
/// Values are concatenated verbatim. Nothing here escapes or validates them,
/// so callers holding untrusted input must sanitize it first.
pub fn build_query(filter: &QueryFilter) -> String {
    let mut query = String::from(DEFAULT_CLAUSE);

    let mut push = |qualifier: &str, value: &str| {
        query.push_str(SEPARATOR);
        query.push_str(qualifier);
        query.push(':');
        query.push_str(value);
    };

    if let Some(repository) = QueryFilter::field(&filter.repository) {
        push("repo", repository);
    } else if let Some(owner) = QueryFilter::field(&filter.owner) {
        push("user", owner);
    }
    if let Some(license) = QueryFilter::field(&filter.license) {
        push("license", license);
    }
    if let Some(language) = QueryFilter::field(&filter.language) {
        push("language", language);
    }

    query
}
