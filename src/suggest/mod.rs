//! Query suggestions over the translated and paraphrased question corpus.

pub mod corpus;
pub mod index;
pub mod normalize;
pub mod ranker;
pub mod repository;
pub mod scoring;

pub use ranker::{rank_suggestions, Match, MAX_SUGGESTIONS, MIN_MATCH_SCORE};
pub use repository::{Clock, CorpusSnapshot, QuestionRepository, SystemClock};

/// Errors from the suggestion path. Loading problems never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    #[error("query is empty")]
    EmptyQuery,
}
