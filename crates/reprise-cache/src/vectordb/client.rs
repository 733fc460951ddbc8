use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchParamsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use std::collections::HashMap;

use super::error::VectorDbError;
use super::model::{AnswerPoint, SearchHit};
use crate::vectordb::WriteConsistency;

/// `hnsw_ef` search parameter passed to Qdrant queries.
pub const SEARCH_HNSW_EF: u64 = 100;

#[derive(Clone)]
/// Direct Qdrant client wrapper.
pub struct QdrantIndex {
    client: Qdrant,
    url: String,
}

impl QdrantIndex {
    /// Creates a client for `url`.
    pub async fn new(url: &str) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Returns the underlying Qdrant client.
    pub fn client(&self) -> &Qdrant {
        &self.client
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Creates a collection with cosine distance.
    pub async fn create_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), VectorDbError> {
        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Ensures a collection exists (creates it if missing).
    pub async fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), VectorDbError> {
        let exists = self.client.collection_exists(name).await.map_err(|e| {
            VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            }
        })?;

        if !exists {
            self.create_collection(name, vector_size).await?;
        }

        Ok(())
    }

    /// Returns `true` if the collection exists.
    pub async fn collection_exists(&self, name: &str) -> Result<bool, VectorDbError> {
        self.client.collection_exists(name).await.map_err(|e| {
            VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Writes one point into a collection.
    pub async fn upsert_point(
        &self,
        collection: &str,
        point: AnswerPoint,
        consistency: WriteConsistency,
    ) -> Result<(), VectorDbError> {
        let citations_json =
            serde_json::to_string(&point.record.citations).map_err(|e| {
                VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: e.to_string(),
                }
            })?;

        let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
        payload.insert("question".to_string(), point.record.question.into());
        payload.insert("content".to_string(), point.record.content.into());
        payload.insert("citations".to_string(), citations_json.into());

        let qdrant_point = PointStruct::new(point.id, point.vector, payload);

        self.client
            .upsert_points(
                UpsertPointsBuilder::new(collection, vec![qdrant_point])
                    .wait(consistency.into()),
            )
            .await
            .map_err(|e| VectorDbError::UpsertFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Searches a collection by vector similarity.
    pub async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchHit>, VectorDbError> {
        let search_builder = SearchPointsBuilder::new(collection, query, limit)
            .with_payload(true)
            .params(SearchParamsBuilder::default().hnsw_ef(SEARCH_HNSW_EF));

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        let results = search_result
            .result
            .into_iter()
            .filter_map(SearchHit::from_scored_point)
            .collect();

        Ok(results)
    }
}

/// Minimal async interface used by higher-level code.
pub trait VectorIndexClient: Send + Sync {
    /// Ensures a collection exists.
    fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;

    /// Writes one point.
    fn upsert_point(
        &self,
        collection: &str,
        point: AnswerPoint,
        consistency: WriteConsistency,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;

    /// Searches for similar points.
    fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, VectorDbError>> + Send;

    /// Returns `true` when the backend is reachable.
    fn is_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}

impl VectorIndexClient for QdrantIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        self.ensure_collection(name, vector_size).await
    }

    async fn upsert_point(
        &self,
        collection: &str,
        point: AnswerPoint,
        consistency: WriteConsistency,
    ) -> Result<(), VectorDbError> {
        self.upsert_point(collection, point, consistency).await
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchHit>, VectorDbError> {
        self.search(collection, query, limit).await
    }

    async fn is_ready(&self) -> bool {
        self.health_check().await.is_ok()
    }
}
