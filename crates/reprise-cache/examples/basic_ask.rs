//! Ask the same question twice against in-memory mocks: a miss, then a hit.
//!
//! Run with: `cargo run --example basic_ask --features mock`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reprise::{
    AnswerEngine, Citation, LookupConfig, MockEmbeddingClient, MockGenerationClient,
    MockVectorIndex, RefusalPolicy,
};

#[tokio::main]
async fn main() -> Result<()> {
    let question = "when does the library open?";
    let content = "The library opens at 8am on weekdays.";
    let vector = vec![1.0, 0.0, 0.0, 0.0];

    let embedder = MockEmbeddingClient::with_dim(4)
        .with_embedding(question, vector.clone())
        .with_embedding(&format!("{question} {content}"), vector);
    let generator = MockGenerationClient::with_answer(
        content,
        vec![Citation::new("Library hours", "https://example.edu/library")],
    );

    let engine = AnswerEngine::new(
        Arc::new(embedder),
        Arc::new(generator),
        Arc::new(MockVectorIndex::new()),
        LookupConfig::default().vector_size(4),
        RefusalPolicy::ExactMatch,
    )?;
    engine.ensure_collection().await?;

    let first = engine.answer(question).await?;
    println!("first ask:  {} ({})", first.content, first.source);

    // Give the background write-back a moment to land.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = engine.answer(question).await?;
    println!("second ask: {} ({})", second.content, second.source);

    Ok(())
}
