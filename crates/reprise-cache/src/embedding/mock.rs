use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::client::EmbeddingClient;
use super::error::EmbeddingError;
use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Deterministic in-memory embedder.
///
/// Unscripted texts get a normalized vector derived from their bytes, so
/// equal texts always embed identically. Tests that need to steer similarity
/// script exact vectors per text.
pub struct MockEmbeddingClient {
    dim: usize,
    scripted: RwLock<HashMap<String, Vec<f32>>>,
    failure: AtomicBool,
}

impl Default for MockEmbeddingClient {
    fn default() -> Self {
        Self::with_dim(DEFAULT_EMBEDDING_DIM)
    }
}

impl MockEmbeddingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim,
            scripted: RwLock::new(HashMap::new()),
            failure: AtomicBool::new(false),
        }
    }

    /// Pins the vector returned for an exact text.
    pub fn with_embedding(self, text: &str, vector: Vec<f32>) -> Self {
        if let Ok(mut scripted) = self.scripted.write() {
            scripted.insert(text.to_string(), vector);
        }
        self
    }

    /// Makes subsequent calls fail with [`EmbeddingError::RequestFailed`].
    pub fn fail_embeddings(&self) {
        self.failure.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.failure.load(Ordering::SeqCst) {
            return Err(EmbeddingError::RequestFailed {
                message: "mock embedder set to fail".to_string(),
            });
        }

        let scripted = self
            .scripted
            .read()
            .map_err(|_| EmbeddingError::RequestFailed {
                message: "lock poisoned".to_string(),
            })?;

        if let Some(vector) = scripted.get(text) {
            return Ok(vector.clone());
        }

        Ok(pseudo_embedding(text, self.dim))
    }
}

/// Derives a stable unit vector from text bytes.
fn pseudo_embedding(text: &str, dim: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dim];
    for (i, byte) in text.bytes().enumerate() {
        vector[i % dim] += f32::from(byte) / 255.0;
    }

    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}
