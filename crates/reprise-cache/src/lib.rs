//! Reprise library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`AnswerEngine`], [`AnsweredQuestion`], [`AnswerSource`] - The ask flow
//! - [`CacheRecord`], [`Citation`] - Stored answer format
//!
//! ## Answer Cache
//! - [`SimilarityIndex`], [`CacheStore`], [`LookupConfig`] - Vector-backed
//!   read and write sides
//! - [`MatchUnits`], [`match_percent`], [`select_reusable`] - Admission filter
//! - [`RefusalPolicy`] - Write-back screening
//!
//! ## Azure Clients
//! - [`AzureEmbeddingClient`] - Embeddings deployment
//! - [`AzureGenerationClient`], [`SearchGrounding`] - Search-grounded chat
//!   completions
//!
//! ## Vector Database
//! - [`QdrantIndex`] - Qdrant access
//! - [`VectorIndexClient`] - The index seam the cache is generic over
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod answer;
pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod generation;
pub mod vectordb;

pub use answer::{
    AnswerEngine, AnswerError, AnswerResult, AnswerSource, AnsweredQuestion, REPRISE_STATUS_ERROR,
    REPRISE_STATUS_HEADER, REPRISE_STATUS_HEALTHY, REPRISE_STATUS_NOT_READY, REPRISE_STATUS_READY,
    RefusalPolicy,
};
pub use cache::{
    CacheError, CacheRecord, CacheResult, CacheStore, Candidate, Citation, DEFAULT_SCORE_THRESHOLD,
    DEFAULT_TOP_K, LookupConfig, MatchUnits, REQUIRED_MATCH_PERCENT, SimilarityIndex,
    UnknownMatchUnits, match_percent, select_reusable,
};
pub use config::{Config, ConfigError, DEFAULT_QDRANT_URL};
pub use constants::{AZURE_API_VERSION, CANNED_REFUSAL, DEFAULT_EMBEDDING_DIM, role_information};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingClient;
pub use embedding::{AzureEmbeddingClient, EmbeddingClient, EmbeddingError};
#[cfg(any(test, feature = "mock"))]
pub use generation::MockGenerationClient;
pub use generation::{
    AzureGenerationClient, GeneratedAnswer, GenerationClient, GenerationError, SearchGrounding,
};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorIndex;
pub use vectordb::{
    AnswerPoint, DEFAULT_COLLECTION_NAME, DEFAULT_VECTOR_SIZE, QdrantIndex, SearchHit,
    VectorDbError, VectorIndexClient, WriteConsistency, cosine_similarity,
};
