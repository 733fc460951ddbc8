//! Tests for the gateway routes, driven through the router with mocked
//! Azure and Qdrant collaborators.

use std::sync::Arc;

use axum::{Router, body::Body, http::Request, http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::gateway::create_router_with_state;
use crate::gateway::error::GatewayError;
use crate::gateway::state::GatewayState;
use reprise::{
    AnswerEngine, CANNED_REFUSAL, Citation, LookupConfig, MockEmbeddingClient,
    MockGenerationClient, MockVectorIndex, REPRISE_STATUS_HEADER, RefusalPolicy,
};

const TEST_COLLECTION_NAME: &str = "gateway_test_answers";

const QUESTION: &str = "When does registration close?";
const ANSWER: &str = "Registration closes two weeks after matriculation.";

fn test_citations() -> Vec<Citation> {
    vec![Citation::new(
        "Registration Guide",
        "https://fupre.edu.ng/registration",
    )]
}

/// Scripted embeddings: the query vector matches the stored write-back
/// vector exactly, so a repeated question scores 1.0 against the cache.
fn scripted_embedder() -> MockEmbeddingClient {
    MockEmbeddingClient::with_dim(4)
        .with_embedding(QUESTION, vec![1.0, 0.0, 0.0, 0.0])
        .with_embedding(&format!("{QUESTION} {ANSWER}"), vec![1.0, 0.0, 0.0, 0.0])
}

/// Builds a router over mocked collaborators, returning handles for
/// asserting on stored points and generator traffic.
async fn setup_router(
    embedder: MockEmbeddingClient,
    generator: MockGenerationClient,
) -> (Router, Arc<MockVectorIndex>, Arc<MockGenerationClient>) {
    let embedder = Arc::new(embedder);
    let generator = Arc::new(generator);
    let index = Arc::new(MockVectorIndex::new());

    let config = LookupConfig::default()
        .collection_name(TEST_COLLECTION_NAME)
        .vector_size(4);

    let engine = AnswerEngine::new(
        Arc::clone(&embedder),
        Arc::clone(&generator),
        Arc::clone(&index),
        config,
        RefusalPolicy::ExactMatch,
    )
    .expect("Failed to construct engine");
    engine
        .ensure_collection()
        .await
        .expect("Failed to ensure collection");

    let state = GatewayState::new(Arc::new(engine));
    (create_router_with_state(state), index, generator)
}

async fn send_ask_request(router: &Router, body: serde_json::Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/ask")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Response body should be valid JSON")
}

mod health_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let (router, _index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let request = Request::builder()
            .method("GET")
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        let status = headers
            .get(REPRISE_STATUS_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(status, "healthy");

        let body_json = response_json(response).await;
        assert_eq!(body_json["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_endpoint_reports_components() {
        let (router, _index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let request = Request::builder()
            .method("GET")
            .uri("/ready")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body_json = response_json(response).await;
        assert_eq!(body_json["status"], "ok");
        assert_eq!(body_json["components"]["http"], "ready");
        assert_eq!(body_json["components"]["vectordb"], "ready");
    }
}

mod ask_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_miss_returns_generated_answer() {
        let (router, _index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let response = send_ask_request(&router, serde_json::json!({"question": QUESTION})).await;

        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        let status = headers
            .get(REPRISE_STATUS_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(status, "MISS");

        let body_json = response_json(response).await;
        assert_eq!(body_json["response"], ANSWER);
        assert_eq!(body_json["citations"][0]["title"], "Registration Guide");
        assert_eq!(
            body_json["citations"][0]["url"],
            "https://fupre.edu.ng/registration"
        );
    }

    #[tokio::test]
    async fn test_ask_hit_on_repeated_question() {
        let (router, _index, generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let first = send_ask_request(&router, serde_json::json!({"question": QUESTION})).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get(REPRISE_STATUS_HEADER).unwrap(), "MISS");

        // The store runs on a spawned task after the first response.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let second = send_ask_request(&router, serde_json::json!({"question": QUESTION})).await;
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(second.headers().get(REPRISE_STATUS_HEADER).unwrap(), "HIT");

        let body_json = response_json(second).await;
        assert_eq!(body_json["response"], ANSWER);

        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_ask_miss_stores_answer() {
        let (router, index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let response = send_ask_request(&router, serde_json::json!({"question": QUESTION})).await;
        assert_eq!(response.status(), StatusCode::OK);

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        assert_eq!(index.point_count(TEST_COLLECTION_NAME), Some(1));
    }

    #[tokio::test]
    async fn test_ask_refusal_answer_not_stored() {
        let (router, index, _generator) =
            setup_router(scripted_embedder(), MockGenerationClient::refusing()).await;

        let response = send_ask_request(&router, serde_json::json!({"question": QUESTION})).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(REPRISE_STATUS_HEADER).unwrap(),
            "MISS"
        );

        let body_json = response_json(response).await;
        assert_eq!(body_json["response"], CANNED_REFUSAL);

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        assert_eq!(index.point_count(TEST_COLLECTION_NAME), Some(0));
    }

    #[tokio::test]
    async fn test_ask_empty_question_rejected() {
        let (router, _index, generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let response = send_ask_request(&router, serde_json::json!({"question": ""})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_json = response_json(response).await;
        assert!(
            body_json["error"]
                .as_str()
                .unwrap()
                .contains("question must not be empty")
        );
        assert_eq!(body_json["code"], 400);

        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_ask_whitespace_question_rejected() {
        let (router, _index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let response = send_ask_request(&router, serde_json::json!({"question": "   \n\t"})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ask_missing_question_field_rejected() {
        let (router, _index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let response = send_ask_request(&router, serde_json::json!({})).await;

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_ask_malformed_body_rejected() {
        let (router, _index, _generator) = setup_router(
            scripted_embedder(),
            MockGenerationClient::with_answer(ANSWER, test_citations()),
        )
        .await;

        let request = Request::builder()
            .method("POST")
            .uri("/ask")
            .header("Content-Type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_ask_generation_failure_maps_to_bad_gateway() {
        let (router, index, _generator) =
            setup_router(scripted_embedder(), MockGenerationClient::failing()).await;

        let response = send_ask_request(&router, serde_json::json!({"question": QUESTION})).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(REPRISE_STATUS_HEADER).unwrap(),
            "generation_error"
        );

        let body_json = response_json(response).await;
        assert_eq!(body_json["error"], "Upstream generation request failed");
        assert_eq!(body_json["code"], 502);

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        assert_eq!(index.point_count(TEST_COLLECTION_NAME), Some(0));
    }
}

mod error_handling_tests {
    use super::*;

    #[tokio::test]
    async fn test_gateway_error_invalid_request_response() {
        let err = GatewayError::InvalidRequest("Test error".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let headers = response.headers();
        let status = headers
            .get(REPRISE_STATUS_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(status, "invalid_request");

        let body_json = response_json(response).await;
        assert!(body_json["error"].as_str().unwrap().contains("Test error"));
        assert_eq!(body_json["code"], 400);
    }

    #[tokio::test]
    async fn test_gateway_error_generation_failed_response() {
        let err = GatewayError::GenerationFailed("Upstream generation request failed".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let headers = response.headers();
        let status = headers
            .get(REPRISE_STATUS_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(status, "generation_error");

        let body_json = response_json(response).await;
        assert_eq!(body_json["error"], "Upstream generation request failed");
        assert_eq!(body_json["code"], 502);
    }
}
