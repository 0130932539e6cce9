//! Short human-readable synopses of article extracts.
//!
//! Two strategies: extractive sentence selection over a bounded window of the
//! text (default), or plain truncation. Extraction reuses the shared
//! embedder to pick the sentences closest to the window's overall meaning;
//! when it produces nothing usable the summary degrades to truncation, never
//! to an error.

use std::sync::Arc;

use clap::ValueEnum;

use crate::embed::{Embedder, cosine_similarity};

/// Inputs shorter than this are returned as-is.
const MIN_INPUT_CHARS: usize = 50;
/// Window of leading text considered for extraction.
const WINDOW_CHARS: usize = 1200;
/// Upper bound on an extractive summary.
const MAX_SUMMARY_CHARS: usize = 360;
/// Length of the truncation fallback.
const TRUNCATE_CHARS: usize = 300;

const NO_SUMMARY: &str = "No summary available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SummaryMode {
    /// Pick the most representative sentences from the leading text.
    #[default]
    Extractive,
    /// Cut the leading text at a fixed length.
    Truncate,
}

pub struct Summarizer {
    mode: SummaryMode,
    embedder: Arc<dyn Embedder>,
}

impl Summarizer {
    pub fn new(mode: SummaryMode, embedder: Arc<dyn Embedder>) -> Self {
        Self { mode, embedder }
    }

    pub fn summarize(&self, text: &str) -> String {
        let stripped = text.trim();
        if stripped.chars().count() < MIN_INPUT_CHARS {
            return if stripped.is_empty() {
                NO_SUMMARY.to_string()
            } else {
                stripped.to_string()
            };
        }

        match self.mode {
            SummaryMode::Truncate => truncate_with_ellipsis(stripped),
            SummaryMode::Extractive => self
                .extract(char_prefix(stripped, WINDOW_CHARS))
                .unwrap_or_else(|| truncate_with_ellipsis(stripped)),
        }
    }

    /// Sentences closest to the window's own embedding, emitted in original
    /// order up to the summary length bound.
    fn extract(&self, window: &str) -> Option<String> {
        let sentences = split_sentences(window);
        if sentences.is_empty() {
            return None;
        }

        let window_vector = self.embedder.embed(window);
        let mut ranked: Vec<(usize, f32)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let score = cosine_similarity(&self.embedder.embed(sentence), &window_vector);
                (index, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut picked: Vec<usize> = Vec::new();
        let mut used = 0usize;
        for (index, _) in ranked {
            let length = sentences[index].chars().count();
            if used + length > MAX_SUMMARY_CHARS {
                continue;
            }
            picked.push(index);
            used += length;
        }
        picked.sort_unstable();

        let summary = picked
            .iter()
            .map(|&index| sentences[index])
            .collect::<Vec<_>>()
            .join(" ");
        let summary = summary.trim();
        (!summary.is_empty()).then(|| summary.to_string())
    }
}

fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

fn truncate_with_ellipsis(text: &str) -> String {
    let prefix = char_prefix(text, TRUNCATE_CHARS);
    if prefix.len() == text.len() {
        text.to_string()
    } else {
        format!("{prefix}...")
    }
}

/// Sentence terminators cover Latin and Persian punctuation.
fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(['.', '!', '?', '؟', '۔'])
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() >= 8)
        .collect()
}
