//! Qdrant vector index integration.

pub mod client;
pub mod error;
pub mod mock;
pub mod model;
pub mod similarity;


pub use client::{QdrantIndex, SEARCH_HNSW_EF, VectorIndexClient};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVectorIndex;
pub use model::{AnswerPoint, SearchHit};
pub use similarity::cosine_similarity;

pub const DEFAULT_COLLECTION_NAME: &str = "reprise_answers";

pub const DEFAULT_VECTOR_SIZE: u64 = crate::constants::DEFAULT_VECTOR_SIZE_U64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteConsistency {
    /// Wait for the operation to be fully indexed and searchable.
    /// Maps to `wait=true`.
    Strong,
    /// Return immediately after the server acknowledges receipt.
    /// Data may not be searchable right away. Maps to `wait=false`.
    Eventual,
}

impl From<WriteConsistency> for bool {
    fn from(c: WriteConsistency) -> bool {
        matches!(c, WriteConsistency::Strong)
    }
}
