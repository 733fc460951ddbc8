//! The ask flow: cache-first answering with asynchronous write-back.
//!
//! [`AnswerEngine`] ties the layers together. A question is embedded and
//! looked up in the similarity index; a candidate that clears both the
//! score threshold and the admission filter is returned as a cache hit.
//! On a miss the generator produces a fresh answer, which is returned
//! immediately while a background task embeds and stores it, unless the
//! [`RefusalPolicy`] classifies it as a refusal.

pub mod engine;
pub mod error;
pub mod refusal;
pub mod types;


pub use engine::AnswerEngine;
pub use error::{AnswerError, AnswerResult};
pub use refusal::RefusalPolicy;
pub use types::{
    AnswerSource, AnsweredQuestion, REPRISE_STATUS_ERROR, REPRISE_STATUS_HEADER,
    REPRISE_STATUS_HEALTHY, REPRISE_STATUS_NOT_READY, REPRISE_STATUS_READY,
};
