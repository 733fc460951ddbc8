use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::vectordb::VectorIndexClient;

use super::config::LookupConfig;
use super::error::{CacheError, CacheResult};
use super::record::Candidate;

/// Read side of the answer cache.
///
/// Wraps a vector index client and turns raw similarity hits into scored
/// [`Candidate`]s: thresholded, sorted best first, and capped at the
/// configured top-K.
pub struct SimilarityIndex<V: VectorIndexClient> {
    index: Arc<V>,
    config: LookupConfig,
}

impl<V: VectorIndexClient> std::fmt::Debug for SimilarityIndex<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityIndex")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<V: VectorIndexClient> SimilarityIndex<V> {
    pub fn new(index: Arc<V>, config: LookupConfig) -> Self {
        Self { index, config }
    }

    /// Creates the backing collection when it does not exist yet.
    pub async fn ensure_collection(&self) -> CacheResult<()> {
        self.index
            .ensure_collection(&self.config.collection_name, self.config.vector_size)
            .await?;
        Ok(())
    }

    /// Returns `true` when the backing index is reachable.
    pub async fn is_ready(&self) -> bool {
        self.index.is_ready().await
    }

    /// Fetches candidates for a query embedding.
    ///
    /// Fails fast with [`CacheError::EmbeddingUnavailable`] for an empty
    /// embedding rather than issuing a meaningless query.
    #[instrument(skip(self, embedding), fields(embedding_dim = embedding.len()))]
    pub async fn query(&self, embedding: &[f32]) -> CacheResult<Vec<Candidate>> {
        if embedding.is_empty() {
            return Err(CacheError::EmbeddingUnavailable);
        }

        let hits = self
            .index
            .search(
                &self.config.collection_name,
                embedding.to_vec(),
                self.config.top_k,
            )
            .await
            .map_err(|e| CacheError::QueryFailed {
                collection: self.config.collection_name.clone(),
                message: e.to_string(),
            })?;

        let mut candidates: Vec<Candidate> = hits
            .into_iter()
            .filter(|hit| hit.score > self.config.score_threshold)
            .map(|hit| Candidate {
                record: hit.record,
                score: hit.score,
            })
            .collect();

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(candidates = candidates.len(), "Similarity query complete");

        Ok(candidates)
    }
}
