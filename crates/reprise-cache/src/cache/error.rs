use crate::vectordb::VectorDbError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the cache layer.
pub enum CacheError {
    /// No query embedding was available for a lookup.
    #[error("no query embedding available for cache lookup")]
    EmbeddingUnavailable,

    /// The similarity query failed.
    #[error("similarity query failed in '{collection}': {message}")]
    QueryFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Writing a record failed.
    #[error("failed to store record in '{collection}': {message}")]
    StoreFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Vector database error outside the search and store paths.
    #[error("vector database error: {0}")]
    VectorDb(#[from] VectorDbError),

    /// Invalid configuration.
    #[error("configuration error: {reason}")]
    Config {
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
