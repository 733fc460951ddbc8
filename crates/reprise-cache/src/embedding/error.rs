use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the embedding client.
pub enum EmbeddingError {
    /// The HTTP request could not be sent or timed out.
    #[error("embedding request failed: {message}")]
    RequestFailed {
        /// Error message.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("embedding endpoint returned status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("invalid embedding response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// The response carried no embedding data.
    #[error("embedding response contained no data")]
    EmptyResponse,
}
