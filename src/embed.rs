//! Text embeddings and similarity scoring.
//!
//! The embedder is the one long-lived model of the service: constructed once
//! in `main` and shared read-only across every request. The default
//! implementation hashes character trigrams into a fixed-size normalized
//! vector. It is deterministic, needs no model download, and works on any
//! Unicode text, so Persian and English candidates score on equal footing.

const DEFAULT: usize = 256;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = DEFAULT;

pub trait Embedder: Send + Sync {
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f32>;
}

#[derive(Debug, Clone, Copy)]
pub struct HashedTrigramEmbedder {
    pub dimensions: usize,
}

impl Default for HashedTrigramEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

impl Embedder for HashedTrigramEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions.max(1)];
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        if chars.is_empty() {
            return vector;
        }

        for window in chars.windows(3.min(chars.len())) {
            let token = window.iter().collect::<String>();
            let mut hash = 1469598103934665603u64;
            for byte in token.bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(1099511628211);
            }
            let bucket = (hash % vector.len() as u64) as usize;
            vector[bucket] += 1.0;
        }

        let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Cosine similarity scaled to a percentage, rounded to two decimals.
///
/// Cosine can in principle go negative, so the full range is [-100, 100];
/// related text lands in [0, 100].
pub fn similarity_percent(a: &[f32], b: &[f32]) -> f64 {
    let similarity = cosine_similarity(a, b) as f64;
    (similarity * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedder_is_deterministic() {
        let embedder = HashedTrigramEmbedder::default();
        let first = embedder.embed("semantic article search");
        let second = embedder.embed("semantic article search");
        assert_eq!(first, second);
    }

    #[test]
    fn embedder_outputs_expected_length() {
        let embedder = HashedTrigramEmbedder { dimensions: 32 };
        assert_eq!(embedder.embed("abc").len(), 32);
        assert_eq!(embedder.embed("").len(), 32);
    }

    #[test]
    fn embedder_handles_non_ascii_text() {
        let embedder = HashedTrigramEmbedder::default();
        let vector = embedder.embed("زبان برنامه‌نویسی راست");
        assert!(vector.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn identical_text_scores_one_hundred() {
        let embedder = HashedTrigramEmbedder::default();
        let vector = embedder.embed("rust programming language");
        assert_eq!(similarity_percent(&vector, &vector), 100.0);
    }

    #[test]
    fn related_text_outranks_unrelated_text() {
        let embedder = HashedTrigramEmbedder::default();
        let query = embedder.embed("rust programming language");
        let related = embedder.embed("rust is a programming language for systems");
        let unrelated = embedder.embed("baking sourdough bread at home");
        assert!(
            similarity_percent(&query, &related) > similarity_percent(&query, &unrelated)
        );
    }

    #[test]
    fn percent_is_rounded_to_two_decimals() {
        let embedder = HashedTrigramEmbedder::default();
        let a = embedder.embed("alpha beta gamma");
        let b = embedder.embed("alpha beta delta");
        let percent = similarity_percent(&a, &b);
        assert_eq!((percent * 100.0).round() / 100.0, percent);
    }

    #[test]
    fn zero_vector_scores_zero() {
        let zeros = vec![0f32; 8];
        let ones = vec![1f32; 8];
        assert_eq!(similarity_percent(&zeros, &ones), 0.0);
    }
}
