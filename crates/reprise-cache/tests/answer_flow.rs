//! End-to-end ask flow against in-memory mocks.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use reprise::{
    AnswerEngine, AnswerSource, Citation, LookupConfig, MockEmbeddingClient, MockGenerationClient,
    MockVectorIndex, RefusalPolicy,
};
use tokio::time::sleep;

const COLLECTION: &str = "answer_flow";

type MockEngine = AnswerEngine<MockEmbeddingClient, MockGenerationClient, MockVectorIndex>;

fn flow_config() -> LookupConfig {
    LookupConfig::default()
        .collection_name(COLLECTION)
        .vector_size(4)
}

async fn engine_with(
    embedder: MockEmbeddingClient,
    generator: Arc<MockGenerationClient>,
) -> (MockEngine, Arc<MockVectorIndex>) {
    let index = Arc::new(MockVectorIndex::new());
    let engine = AnswerEngine::new(
        Arc::new(embedder),
        generator,
        Arc::clone(&index),
        flow_config(),
        RefusalPolicy::ExactMatch,
    )
    .expect("engine config should validate");
    engine
        .ensure_collection()
        .await
        .expect("collection bootstrap should succeed");
    (engine, index)
}

#[tokio::test]
async fn test_miss_then_hit_round_trip() {
    let question = "how do I reset my student portal password?";
    let content = "Use the 'Forgot password' link on the portal login page.";
    let vector = vec![1.0, 0.0, 0.0, 0.0];
    let embedder = MockEmbeddingClient::with_dim(4)
        .with_embedding(question, vector.clone())
        .with_embedding(&format!("{question} {content}"), vector);
    let generator = Arc::new(MockGenerationClient::with_answer(content, Vec::new()));
    let (engine, index) = engine_with(embedder, Arc::clone(&generator)).await;

    let first = engine.answer(question).await.expect("first ask");
    sleep(Duration::from_millis(100)).await;
    let second = engine.answer(question).await.expect("second ask");

    assert_eq!(first.source, AnswerSource::Generated);
    assert_eq!(second.source, AnswerSource::Cache);
    assert_eq!(second.content, content);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(index.point_count(COLLECTION), Some(1));
}

#[tokio::test]
async fn test_citations_flow_through_unchanged() {
    let question = "what documents do I need for clearance?";
    let content = "Bring your admission letter, O-level results, and birth certificate.";
    let citations = vec![
        Citation::new("Clearance checklist", "https://fupre.edu.ng/clearance"),
        Citation::new("Admissions FAQ", "https://fupre.edu.ng/admissions"),
    ];
    let vector = vec![0.0, 1.0, 0.0, 0.0];
    let embedder = MockEmbeddingClient::with_dim(4)
        .with_embedding(question, vector.clone())
        .with_embedding(&format!("{question} {content}"), vector);
    let generator = Arc::new(MockGenerationClient::with_answer(content, citations.clone()));
    let (engine, _index) = engine_with(embedder, Arc::clone(&generator)).await;

    let miss = engine.answer(question).await.expect("miss ask");
    sleep(Duration::from_millis(100)).await;
    let hit = engine.answer(question).await.expect("hit ask");

    assert_eq!(miss.citations, citations);
    assert_eq!(hit.source, AnswerSource::Cache);
    assert_eq!(hit.citations, citations);
}

#[tokio::test]
async fn test_distinct_questions_accumulate_points() {
    let embedder = MockEmbeddingClient::with_dim(4);
    let generator = Arc::new(MockGenerationClient::with_answer(
        "See the student handbook.",
        Vec::new(),
    ));
    let (engine, index) = engine_with(embedder, Arc::clone(&generator)).await;

    engine
        .answer("when does the semester start?")
        .await
        .expect("first ask");
    engine
        .answer("where do I collect my id card?")
        .await
        .expect("second ask");
    sleep(Duration::from_millis(100)).await;

    assert_eq!(index.point_count(COLLECTION), Some(2));
    assert_eq!(generator.call_count(), 2);
}

#[tokio::test]
async fn test_concurrent_identical_questions_each_generate() {
    // The write-back is asynchronous, so simultaneous misses on the same
    // question race ahead of the store and each reach the generator.
    let question = "how do I pay acceptance fees?";
    let embedder = MockEmbeddingClient::with_dim(4);
    let generator = Arc::new(MockGenerationClient::with_answer(
        "Pay through the bursary portal.",
        Vec::new(),
    ));
    let (engine, _index) = engine_with(embedder, Arc::clone(&generator)).await;

    let answers = join_all((0..3).map(|_| engine.answer(question))).await;

    for answer in answers {
        let answer = answer.expect("concurrent ask");
        assert_eq!(answer.source, AnswerSource::Generated);
        assert_eq!(answer.content, "Pay through the bursary portal.");
    }
    assert_eq!(generator.call_count(), 3);
}
