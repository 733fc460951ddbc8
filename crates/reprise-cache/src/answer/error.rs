use thiserror::Error;

use crate::cache::CacheError;

/// Errors surfaced by [`AnswerEngine`](super::AnswerEngine).
///
/// Cache trouble never fails a request; the engine degrades to generating
/// directly. Only generation itself, and collection bootstrap, can error.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The upstream generation request failed and no answer exists.
    #[error("generation failed: {reason}")]
    GenerationFailed {
        /// Description of the upstream failure.
        reason: String,
    },

    /// Cache layer failure during setup.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

pub type AnswerResult<T> = Result<T, AnswerError>;
