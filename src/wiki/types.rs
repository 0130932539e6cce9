use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Error object some MediaWiki failures carry inside a 200 response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorInfo {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// Response shape of a `list=search` page.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Continuation parameters to mirror back into the next page request.
    #[serde(rename = "continue")]
    pub cont: Option<HashMap<String, Value>>,
    pub query: Option<SearchBody>,
    pub error: Option<ApiErrorInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// Response shape of a `prop=extracts` lookup.
#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub query: Option<ExtractBody>,
    pub error: Option<ApiErrorInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractBody {
    /// Keyed by page id; `"-1"` marks a missing page.
    #[serde(default)]
    pub pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub extract: Option<String>,
}
