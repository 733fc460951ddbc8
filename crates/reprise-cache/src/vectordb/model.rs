use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;
use uuid::Uuid;

use crate::cache::{CacheRecord, Citation};

/// A point ready to be written to the vector index.
///
/// Every point gets a fresh UUID, so repeated answers to the same question
/// accumulate as separate points instead of overwriting each other.
#[derive(Debug, Clone)]
pub struct AnswerPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub record: CacheRecord,
}

impl AnswerPoint {
    pub fn new(record: CacheRecord, vector: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vector,
            record,
        }
    }
}

/// A search hit with its parsed payload.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
    pub record: CacheRecord,
}

impl SearchHit {
    /// Parses a scored point, returning `None` when the payload is missing
    /// the question or content fields.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Uuid(s)) => s,
            Some(PointIdOptions::Num(n)) => n.to_string(),
            None => return None,
        };

        let payload = point.payload;

        let question = payload
            .get("question")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())?;

        let content = payload
            .get("content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())?;

        let citations = payload
            .get("citations")
            .and_then(|v| v.as_str())
            .and_then(|s| serde_json::from_str::<Vec<Citation>>(s).ok())
            .unwrap_or_default();

        Some(SearchHit {
            id,
            score: point.score,
            record: CacheRecord {
                question,
                content,
                citations,
            },
        })
    }
}
