//! Search orchestration: bilingual candidate merging, relevance scoring, and ranking.

pub mod engine;
pub(crate) mod merge;
pub mod types;

pub use engine::{PipelineConfig, PipelineError, SearchPipeline};
pub use types::ScoredResult;
