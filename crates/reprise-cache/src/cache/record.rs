use serde::{Deserialize, Serialize};

/// Source document reference attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Document title.
    pub title: String,
    /// Document URL.
    pub url: String,
}

impl Citation {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// One cached question/answer pair as persisted in the index payload.
///
/// The embedding is not part of the payload; it is stored as the point's
/// vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Question the answer was originally produced for.
    pub question: String,
    /// Answer text.
    pub content: String,
    /// Citations backing the answer.
    pub citations: Vec<Citation>,
}

/// A stored record paired with its similarity score for one lookup.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub record: CacheRecord,
    pub score: f32,
}
