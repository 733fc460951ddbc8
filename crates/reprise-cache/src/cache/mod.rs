//! Answer cache: record types, admission filter, index and store adapters.

pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod record;
pub mod store;


pub use config::{DEFAULT_SCORE_THRESHOLD, DEFAULT_TOP_K, LookupConfig};
pub use error::{CacheError, CacheResult};
pub use filter::{
    MatchUnits, REQUIRED_MATCH_PERCENT, UnknownMatchUnits, match_percent, select_reusable,
};
pub use index::SimilarityIndex;
pub use record::{CacheRecord, Candidate, Citation};
pub use store::CacheStore;
