pub mod types;

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use types::{ApiErrorInfo, ExtractResponse, SearchResponse};

/// Largest page size the search endpoint accepts.
const SEARCH_PAGE_LIMIT: u32 = 500;
/// Leading sentences requested per article extract.
const EXTRACT_SENTENCES: u32 = 10;
/// Wait between consecutive search pages, required by the API's abuse policy.
const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(600);

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("Wikipedia API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("Wikipedia API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Wikipedia API rejected the request ({code}): {info}")]
    Rejected { code: String, info: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Article lookup operations the ranking pipeline depends on.
/// Implemented by `WikiClient` for production; mock implementations used in tests.
#[async_trait]
pub trait ArticleSource {
    /// Full-text search of one language edition, paginated up to `cap` titles.
    async fn search_titles(
        &self,
        query: &str,
        lang: &str,
        cap: usize,
    ) -> Result<Vec<String>, WikiError>;

    /// Plain-text excerpt of an article's leading sentences.
    /// `Ok(None)` means the article has no page or no extractable content.
    async fn fetch_extract(&self, title: &str, lang: &str)
    -> Result<Option<String>, WikiError>;
}

/// HTTP client for the MediaWiki Action API.
///
/// One instance serves every language edition; the edition is selected per
/// call through the `<lang>.wikipedia.org` subdomain.
#[derive(Clone)]
pub struct WikiClient {
    http: Client,
    base_override: Option<String>,
    page_delay: Duration,
}

impl WikiClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_override: None,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Route API traffic through an alternate host (proxy and test setups).
    /// The language code becomes a path segment instead of a subdomain.
    pub fn with_api_base(http: Client, base: &str) -> Self {
        Self {
            http,
            base_override: Some(base.trim_end_matches('/').to_string()),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    fn api_url(&self, lang: &str) -> String {
        match &self.base_override {
            Some(base) => format!("{base}/{lang}/w/api.php"),
            None => format!("https://{lang}.wikipedia.org/w/api.php"),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        lang: &str,
        params: &[(String, String)],
    ) -> Result<T, WikiError> {
        let response = self
            .http
            .get(self.api_url(lang))
            .query(params)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WikiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            return Err(WikiError::Api {
                code: status.as_u16(),
                message: snippet,
            });
        }

        Ok(response.json().await?)
    }

    async fn get_json_retry<T: serde::de::DeserializeOwned>(
        &self,
        lang: &str,
        params: &[(String, String)],
    ) -> Result<T, WikiError> {
        let mut last_err = None;
        for attempt in 0..MAX_RETRIES {
            match self.get_json(lang, params).await {
                Ok(value) => return Ok(value),
                Err(e) if is_retriable(&e) => {
                    last_err = Some(e);
                    if attempt + 1 < MAX_RETRIES {
                        let delay_ms = jittered_backoff(attempt);
                        debug!(
                            attempt = attempt + 1,
                            delay_ms, "retrying after transient error"
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or(WikiError::RateLimited))
    }
}

#[async_trait]
impl ArticleSource for WikiClient {
    async fn search_titles(
        &self,
        query: &str,
        lang: &str,
        cap: usize,
    ) -> Result<Vec<String>, WikiError> {
        let mut titles: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cont: Option<Vec<(String, String)>> = None;
        let mut first_page = true;

        loop {
            let mut params: Vec<(String, String)> = [
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
                ("srwhat", "text"),
                ("srprop", "snippet"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
            params.push(("srlimit".to_string(), SEARCH_PAGE_LIMIT.to_string()));
            if let Some(cont) = cont.take() {
                params.extend(cont);
            }

            let page: SearchResponse = match self.get_json_retry(lang, &params).await {
                Ok(page) => page,
                Err(e) if first_page => return Err(e),
                Err(e) => {
                    warn!(%lang, error = %e, "search page failed, keeping titles collected so far");
                    break;
                }
            };
            first_page = false;

            if let Some(err) = page.error {
                return Err(rejected(err));
            }
            if let Some(body) = page.query {
                for hit in body.search {
                    if seen.insert(hit.title.clone()) {
                        titles.push(hit.title);
                    }
                }
            }
            debug!(%lang, collected = titles.len(), "search page done");

            match page.cont {
                Some(next) if titles.len() < cap => {
                    cont = Some(
                        next.into_iter()
                            .map(|(key, value)| (key, param_value(&value)))
                            .collect(),
                    );
                    tokio::time::sleep(self.page_delay).await;
                }
                _ => break,
            }
        }

        titles.truncate(cap);
        Ok(titles)
    }

    async fn fetch_extract(
        &self,
        title: &str,
        lang: &str,
    ) -> Result<Option<String>, WikiError> {
        let mut params: Vec<(String, String)> = [
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("titles", title),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        params.push(("exsentences".to_string(), EXTRACT_SENTENCES.to_string()));

        let response: ExtractResponse = self.get_json_retry(lang, &params).await?;
        if let Some(err) = response.error {
            return Err(rejected(err));
        }

        let extract = response
            .query
            .and_then(|body| body.pages.into_values().next())
            .and_then(|page| page.extract)
            .filter(|text| !text.trim().is_empty());
        Ok(extract)
    }
}

/// Continuation values arrive as mixed JSON scalars; the API wants them back
/// as plain query-string values.
fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn rejected(err: ApiErrorInfo) -> WikiError {
    WikiError::Rejected {
        code: err.code,
        info: err.info,
    }
}

fn is_retriable(e: &WikiError) -> bool {
    matches!(
        e,
        WikiError::RateLimited
            | WikiError::Api {
                code: 500..=599,
                ..
            }
    )
}

/// Equal jitter backoff: base/2 + rand(0, base/2).
fn jittered_backoff(attempt: u32) -> u64 {
    let base = INITIAL_BACKOFF_MS * 2u64.pow(attempt);
    let half = base / 2;
    half + fastrand::u64(..half.max(1))
}
