use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the generation client.
pub enum GenerationError {
    /// The HTTP request could not be sent or timed out.
    #[error("completion request failed: {message}")]
    RequestFailed {
        /// Error message.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("invalid completion response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// The response carried no usable choice.
    #[error("completion response contained no answer")]
    EmptyResponse,
}
