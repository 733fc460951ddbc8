//! Answer generation over Azure OpenAI.
//!
//! Cache misses are answered by a chat completion grounded on an Azure AI
//! Search index through the `data_sources` extension. [`GenerationClient`]
//! is the seam the answer engine talks to; [`AzureGenerationClient`] is the
//! production implementation and [`MockGenerationClient`] the scripted one
//! for tests.

pub mod client;
pub mod error;
pub mod mock;
pub mod model;

pub use client::{AzureGenerationClient, GenerationClient, SearchGrounding};
pub use error::GenerationError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationClient;
pub use model::GeneratedAnswer;
