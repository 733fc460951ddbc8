use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AskRequest, AskResponse};
use crate::gateway::state::GatewayState;
use reprise::{EmbeddingClient, GenerationClient, REPRISE_STATUS_HEADER, VectorIndexClient};

/// Client-facing message for generation failures. Upstream detail is logged
/// server-side only.
const GENERATION_FAILED_MESSAGE: &str = "Upstream generation request failed";

#[instrument(skip(state, request), fields(question_len = tracing::field::Empty))]
pub async fn ask_handler<E, G, V>(
    State(state): State<GatewayState<E, G, V>>,
    Json(request): Json<AskRequest>,
) -> Result<Response, GatewayError>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient + 'static,
    V: VectorIndexClient + 'static,
{
    let question = request.question.trim();
    if question.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "question must not be empty".to_string(),
        ));
    }
    tracing::Span::current().record("question_len", question.len());

    let answered = state.engine.answer(question).await.map_err(|e| {
        error!(error = %e, "Answer request failed");
        GatewayError::GenerationFailed(GENERATION_FAILED_MESSAGE.to_string())
    })?;

    info!(
        source = %answered.source,
        citations = answered.citations.len(),
        "Answer ready"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        REPRISE_STATUS_HEADER,
        HeaderValue::from_static(answered.source.as_header_value()),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(AskResponse {
            response: answered.content,
            citations: answered.citations,
        }),
    )
        .into_response())
}
