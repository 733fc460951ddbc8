use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use reprise::REPRISE_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream generation failure. The display string is the full client
    /// message; internal error detail stays in the server log.
    #[error("{0}")]
    GenerationFailed(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message, reprise_status) = match &self {
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "invalid_request")
            }
            GatewayError::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                self.to_string(),
                "generation_error",
            ),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            REPRISE_STATUS_HEADER,
            HeaderValue::from_str(reprise_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
