use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::cache::ResultCache;
use crate::embed::{Embedder, similarity_percent};
use crate::relevance::{RelevanceThresholds, help_label};
use crate::summary::Summarizer;
use crate::wiki::{ArticleSource, WikiError};

use super::merge::merge_candidates;
use super::types::{Candidate, ScoredResult, article_url};

/// Articles fetched and scored at the same time.
const CANDIDATE_CONCURRENCY: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Wiki(#[from] WikiError),
}

/// Tunables for one pipeline instance. Defaults mirror the production
/// deployment: Persian as the local edition, English as the cross edition.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub local_lang: String,
    pub cross_lang: String,
    /// Titles collected per edition before merging.
    pub search_cap: usize,
    /// Titles taken from each edition into the scored candidate set.
    pub merge_limit: usize,
    /// Results returned per query.
    pub top_n: usize,
    pub thresholds: RelevanceThresholds,
    pub cache_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            local_lang: "fa".to_string(),
            cross_lang: "en".to_string(),
            search_cap: 800,
            merge_limit: 15,
            top_n: 5,
            thresholds: RelevanceThresholds::default(),
            cache_capacity: 100,
        }
    }
}

/// The query-to-ranked-results pipeline: bilingual search fan-out, candidate
/// merge, per-candidate scoring, deterministic ranking, bounded caching.
pub struct SearchPipeline<A> {
    source: A,
    embedder: Arc<dyn Embedder>,
    summarizer: Summarizer,
    cache: Mutex<ResultCache>,
    config: PipelineConfig,
}

impl<A: ArticleSource + Send + Sync> SearchPipeline<A> {
    pub fn new(
        source: A,
        embedder: Arc<dyn Embedder>,
        summarizer: Summarizer,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            embedder,
            summarizer,
            cache: Mutex::new(ResultCache::new(config.cache_capacity)),
            config,
        }
    }

    pub async fn rank(&self, query: &str) -> Result<Vec<ScoredResult>, PipelineError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(hit) = self.cache().get(query) {
            debug!(%query, "cache hit");
            return Ok(hit);
        }

        let local_search =
            self.source
                .search_titles(query, &self.config.local_lang, self.config.search_cap);
        let cross_search =
            self.source
                .search_titles(query, &self.config.cross_lang, self.config.search_cap);
        let outcomes = futures::join!(local_search, cross_search);

        let (local_titles, cross_titles) = match outcomes {
            (Ok(local), Ok(cross)) => (local, cross),
            (Ok(local), Err(e)) => {
                warn!(lang = %self.config.cross_lang, error = %e,
                    "partial search failure (continuing with one edition)");
                (local, Vec::new())
            }
            (Err(e), Ok(cross)) => {
                warn!(lang = %self.config.local_lang, error = %e,
                    "partial search failure (continuing with one edition)");
                (Vec::new(), cross)
            }
            (Err(e), Err(_)) => return Err(e.into()),
        };

        let candidates = merge_candidates(
            &local_titles,
            &self.config.local_lang,
            &cross_titles,
            &self.config.cross_lang,
            self.config.merge_limit,
        );
        info!(
            %query,
            local = local_titles.len(),
            cross = cross_titles.len(),
            candidates = candidates.len(),
            "search fan-out complete"
        );

        // One query embedding per request, shared across all candidates.
        let query_vector = self.embedder.embed(query);

        let mut results: Vec<ScoredResult> = stream::iter(candidates)
            .map(|candidate| self.score_candidate(candidate, &query_vector))
            .buffer_unordered(CANDIDATE_CONCURRENCY)
            .filter_map(|scored| async move { scored })
            .collect()
            .await;

        results.sort_by(|a, b| {
            b.percent
                .total_cmp(&a.percent)
                .then_with(|| a.title.cmp(&b.title))
        });
        results.truncate(self.config.top_n);

        self.cache().insert(query.to_string(), results.clone());
        Ok(results)
    }

    async fn score_candidate(
        &self,
        candidate: Candidate,
        query_vector: &[f32],
    ) -> Option<ScoredResult> {
        let text = match self
            .source
            .fetch_extract(&candidate.title, &candidate.lang)
            .await
        {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(title = %candidate.title, "no extract, skipping");
                return None;
            }
            Err(e) => {
                warn!(title = %candidate.title, error = %e, "extract fetch failed, skipping candidate");
                return None;
            }
        };

        let percent = similarity_percent(query_vector, &self.embedder.embed(&text));
        Some(ScoredResult {
            url: article_url(&candidate.title, &candidate.lang),
            lang: candidate.lang.to_uppercase(),
            help: help_label(percent, self.config.thresholds).to_string(),
            summary: self.summarizer.summarize(&text),
            title: candidate.title,
            percent,
        })
    }

    fn cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
