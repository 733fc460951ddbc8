//! Embedding generation via Azure OpenAI.

pub mod client;
pub mod error;
pub mod mock;

pub use client::{AzureEmbeddingClient, EmbeddingClient};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingClient;
