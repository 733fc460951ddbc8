use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::cache::CacheRecord;
use crate::vectordb::{
    AnswerPoint, SearchHit, VectorDbError, VectorIndexClient, WriteConsistency, cosine_similarity,
};

/// In-memory stand-in for the Qdrant index.
///
/// Scores with real cosine similarity so tests can steer hits and misses by
/// choosing vectors.
#[derive(Default)]
pub struct MockVectorIndex {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
    search_calls: AtomicUsize,
    search_failure: AtomicBool,
    upsert_failure: AtomicBool,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<String, MockStoredPoint>,
}

#[derive(Clone)]
struct MockStoredPoint {
    vector: Vec<f32>,
    record: CacheRecord,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }

    /// Number of searches issued against this mock.
    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Makes subsequent searches fail with [`VectorDbError::SearchFailed`].
    pub fn fail_searches(&self) {
        self.search_failure.store(true, Ordering::SeqCst);
    }

    /// Makes subsequent upserts fail with [`VectorDbError::UpsertFailed`].
    pub fn fail_upserts(&self) {
        self.upsert_failure.store(true, Ordering::SeqCst);
    }

    /// Stored records for a collection, in arbitrary order.
    pub fn records(&self, collection: &str) -> Vec<CacheRecord> {
        self.collections
            .read()
            .ok()
            .and_then(|collections| {
                collections
                    .get(collection)
                    .map(|c| c.points.values().map(|p| p.record.clone()).collect())
            })
            .unwrap_or_default()
    }
}

impl VectorIndexClient for MockVectorIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::CreateCollectionFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        collections
            .entry(name.to_string())
            .or_insert(MockCollection {
                vector_size,
                points: HashMap::new(),
            });

        Ok(())
    }

    async fn upsert_point(
        &self,
        collection: &str,
        point: AnswerPoint,
        _consistency: WriteConsistency,
    ) -> Result<(), VectorDbError> {
        if self.upsert_failure.load(Ordering::SeqCst) {
            return Err(VectorDbError::UpsertFailed {
                collection: collection.to_string(),
                message: "mock upsert set to fail".to_string(),
            });
        }

        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        if point.vector.len() as u64 != coll.vector_size {
            return Err(VectorDbError::InvalidDimension {
                expected: coll.vector_size as usize,
                actual: point.vector.len(),
            });
        }

        coll.points.insert(
            point.id,
            MockStoredPoint {
                vector: point.vector,
                record: point.record,
            },
        );

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchHit>, VectorDbError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.search_failure.load(Ordering::SeqCst) {
            return Err(VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "mock search set to fail".to_string(),
            });
        }

        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let mut results: Vec<SearchHit> = coll
            .points
            .iter()
            .map(|(id, p)| SearchHit {
                id: id.clone(),
                score: cosine_similarity(&query, &p.vector),
                record: p.record.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit as usize);
        Ok(results)
    }

    async fn is_ready(&self) -> bool {
        true
    }
}
