//! Mapping of a similarity percentage onto one of three relevance labels.

const HIGH_LABEL: &str = "Likely contains a complete answer to your question.";
const MEDIUM_LABEL: &str = "Reasonably relevant; partially covers the answer.";
const LOW_LABEL: &str = "Low relevance; consult other sources as well.";

/// Cut points between the three bands, in percent. Both cuts are exclusive:
/// a score sitting exactly on a cut falls into the band below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for RelevanceThresholds {
    fn default() -> Self {
        Self {
            high: 82.0,
            medium: 58.0,
        }
    }
}

/// Pure function of the score and the configured cut points.
pub fn help_label(percent: f64, thresholds: RelevanceThresholds) -> &'static str {
    if percent > thresholds.high {
        HIGH_LABEL
    } else if percent > thresholds.medium {
        MEDIUM_LABEL
    } else {
        LOW_LABEL
    }
}
