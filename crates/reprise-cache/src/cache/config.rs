use crate::vectordb::{DEFAULT_COLLECTION_NAME, DEFAULT_VECTOR_SIZE};

use super::error::{CacheError, CacheResult};
use super::filter::MatchUnits;

pub const DEFAULT_TOP_K: u64 = 5;
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.95;

/// Settings shared by cache lookups and storage.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Collection holding the cached answers.
    pub collection_name: String,
    /// Vector size used when bootstrapping the collection.
    pub vector_size: u64,
    /// Candidates fetched per similarity query.
    pub top_k: u64,
    /// Minimum similarity score a candidate must exceed.
    pub score_threshold: f32,
    /// Unit of measure for the admission filter.
    pub match_units: MatchUnits,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            vector_size: DEFAULT_VECTOR_SIZE,
            top_k: DEFAULT_TOP_K,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            match_units: MatchUnits::default(),
        }
    }
}

impl LookupConfig {
    pub fn collection_name(mut self, name: &str) -> Self {
        self.collection_name = name.to_string();
        self
    }

    pub fn vector_size(mut self, size: u64) -> Self {
        self.vector_size = size;
        self
    }

    pub fn top_k(mut self, top_k: u64) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn match_units(mut self, units: MatchUnits) -> Self {
        self.match_units = units;
        self
    }

    pub fn validate(&self) -> CacheResult<()> {
        if self.collection_name.is_empty() {
            return Err(CacheError::Config {
                reason: "collection_name must not be empty".to_string(),
            });
        }
        if self.vector_size == 0 {
            return Err(CacheError::Config {
                reason: "vector_size must be > 0".to_string(),
            });
        }
        if self.top_k == 0 {
            return Err(CacheError::Config {
                reason: "top_k must be > 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(CacheError::Config {
                reason: format!(
                    "score_threshold ({}) must be within [0.0, 1.0]",
                    self.score_threshold
                ),
            });
        }
        Ok(())
    }
}
