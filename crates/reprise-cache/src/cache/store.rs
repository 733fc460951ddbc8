use std::sync::Arc;

use tracing::{debug, instrument};

use crate::vectordb::{AnswerPoint, VectorIndexClient, WriteConsistency};

use super::error::{CacheError, CacheResult};
use super::record::{CacheRecord, Citation};

/// Write side of the answer cache.
///
/// Appends records: each write creates a point under a fresh id, existing
/// points are never updated or deleted.
pub struct CacheStore<V: VectorIndexClient> {
    index: Arc<V>,
    collection_name: String,
}

impl<V: VectorIndexClient> Clone for CacheStore<V> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
            collection_name: self.collection_name.clone(),
        }
    }
}

impl<V: VectorIndexClient> std::fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("collection_name", &self.collection_name)
            .finish_non_exhaustive()
    }
}

impl<V: VectorIndexClient> CacheStore<V> {
    pub fn new(index: Arc<V>, collection_name: &str) -> Self {
        Self {
            index,
            collection_name: collection_name.to_string(),
        }
    }

    #[instrument(
        skip(self, content, citations, embedding),
        fields(question_len = question.len(), embedding_dim = embedding.len())
    )]
    pub async fn store(
        &self,
        question: &str,
        content: &str,
        citations: Vec<Citation>,
        embedding: Vec<f32>,
    ) -> CacheResult<()> {
        let record = CacheRecord {
            question: question.to_string(),
            content: content.to_string(),
            citations,
        };

        let point = AnswerPoint::new(record, embedding);
        let point_id = point.id.clone();

        self.index
            .upsert_point(&self.collection_name, point, WriteConsistency::Eventual)
            .await
            .map_err(|e| CacheError::StoreFailed {
                collection: self.collection_name.clone(),
                message: e.to_string(),
            })?;

        debug!(point_id = %point_id, "Answer stored in cache");

        Ok(())
    }
}
