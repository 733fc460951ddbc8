//! HTTP gateway (Axum) for the ask endpoint.
//!
//! This module is primarily used by the `reprise` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::ask_handler;
pub use state::GatewayState;

use reprise::{
    EmbeddingClient, GenerationClient, REPRISE_STATUS_HEADER, REPRISE_STATUS_HEALTHY,
    REPRISE_STATUS_READY, VectorIndexClient,
};

pub fn create_router_with_state<E, G, V>(state: GatewayState<E, G, V>) -> Router
where
    E: EmbeddingClient + 'static,
    G: GenerationClient + 'static,
    V: VectorIndexClient + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/ask", post(ask_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub vectordb: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        REPRISE_STATUS_HEADER,
        HeaderValue::from_static(REPRISE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

use axum::extract::State;

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, G, V>(State(state): State<GatewayState<E, G, V>>) -> Response
where
    E: EmbeddingClient + 'static,
    G: GenerationClient + 'static,
    V: VectorIndexClient + 'static,
{
    let vectordb_status = if state.engine.is_ready().await {
        REPRISE_STATUS_READY
    } else {
        "pending"
    };

    let components = ComponentStatus {
        http: REPRISE_STATUS_READY,
        vectordb: vectordb_status,
    };

    let is_ready = components.vectordb == REPRISE_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(
        REPRISE_STATUS_HEADER,
        HeaderValue::from_str(status_msg).unwrap_or(HeaderValue::from_static("error")),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
