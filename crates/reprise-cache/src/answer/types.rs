use crate::cache::Citation;

/// Response header used to report cache status.
pub const REPRISE_STATUS_HEADER: &str = "X-Reprise-Status";
/// Health value for status endpoints.
pub const REPRISE_STATUS_HEALTHY: &str = "healthy";
/// Ready value for status endpoints.
pub const REPRISE_STATUS_READY: &str = "ready";
/// Not-ready value for status endpoints.
pub const REPRISE_STATUS_NOT_READY: &str = "not_ready";
/// Error value for status endpoints.
pub const REPRISE_STATUS_ERROR: &str = "error";

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerSource {
    /// Reused from a previously stored answer.
    Cache,
    /// Freshly generated for this request.
    Generated,
}

impl AnswerSource {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            AnswerSource::Cache => "HIT",
            AnswerSource::Generated => "MISS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, AnswerSource::Cache)
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

/// A resolved answer, ready to be returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub content: String,
    pub citations: Vec<Citation>,
    pub source: AnswerSource,
}
