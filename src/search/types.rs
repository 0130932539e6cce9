use serde::{Deserialize, Serialize};

/// One ranked article in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub title: String,
    /// Cosine similarity to the query as a percentage, two decimals.
    pub percent: f64,
    /// Relevance band label.
    pub help: String,
    pub summary: String,
    pub url: String,
    /// Uppercased language code of the source edition.
    pub lang: String,
}

/// A merged search hit attributed to the language edition it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub lang: String,
}

/// Canonical article URL: spaces become underscores, the edition becomes the
/// subdomain.
pub fn article_url(title: &str, lang: &str) -> String {
    format!(
        "https://{lang}.wikipedia.org/wiki/{}",
        title.replace(' ', "_")
    )
}
