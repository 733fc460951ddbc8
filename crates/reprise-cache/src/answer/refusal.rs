use tracing::warn;

use crate::constants::CANNED_REFUSAL;
use crate::embedding::EmbeddingClient;
use crate::vectordb::cosine_similarity;

/// How generated answers are screened before being written back.
///
/// The assistant is instructed to fall back to a fixed refusal when a
/// question is out of scope. Caching that refusal would pin it to the
/// question's embedding and replay it forever, so refusals are detected
/// and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RefusalPolicy {
    /// The answer must equal the canned refusal exactly.
    #[default]
    ExactMatch,
    /// The answer's embedding must be within `threshold` cosine similarity
    /// of the canned refusal's embedding. Catches lightly reworded refusals.
    EmbeddingSimilarity { threshold: f32 },
}

impl RefusalPolicy {
    /// Decides whether `answer` is a refusal that must not be cached.
    ///
    /// Falls back to the exact comparison when the embedding service is
    /// unavailable, so a flaky embedder cannot let refusals through
    /// unchecked.
    pub async fn is_refusal<E>(&self, embedder: &E, answer: &str) -> bool
    where
        E: EmbeddingClient + ?Sized,
    {
        match self {
            RefusalPolicy::ExactMatch => answer == CANNED_REFUSAL,
            RefusalPolicy::EmbeddingSimilarity { threshold } => {
                if answer == CANNED_REFUSAL {
                    return true;
                }

                let embeds = futures_util::future::try_join(
                    embedder.embed(answer),
                    embedder.embed(CANNED_REFUSAL),
                );
                match embeds.await {
                    Ok((answer_vec, refusal_vec)) => {
                        cosine_similarity(&answer_vec, &refusal_vec) >= *threshold
                    }
                    Err(e) => {
                        warn!(error = %e, "refusal embedding failed, using exact comparison");
                        false
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingClient;

    #[tokio::test]
    async fn test_exact_policy_flags_the_canned_text() {
        let embedder = MockEmbeddingClient::with_dim(4);
        let policy = RefusalPolicy::ExactMatch;

        assert!(policy.is_refusal(&embedder, CANNED_REFUSAL).await);
        assert!(!policy.is_refusal(&embedder, "The library opens at 8am.").await);
    }

    #[tokio::test]
    async fn test_similarity_policy_flags_reworded_refusals() {
        let embedder = MockEmbeddingClient::with_dim(4)
            .with_embedding(CANNED_REFUSAL, vec![1.0, 0.0, 0.0, 0.0])
            .with_embedding("Sorry, I cannot share that.", vec![0.99, 0.1, 0.0, 0.0])
            .with_embedding("The library opens at 8am.", vec![0.0, 1.0, 0.0, 0.0]);
        let policy = RefusalPolicy::EmbeddingSimilarity { threshold: 0.9 };

        assert!(policy.is_refusal(&embedder, "Sorry, I cannot share that.").await);
        assert!(!policy.is_refusal(&embedder, "The library opens at 8am.").await);
    }

    #[tokio::test]
    async fn test_similarity_policy_still_catches_the_exact_text() {
        let embedder = MockEmbeddingClient::with_dim(4);
        embedder.fail_embeddings();
        let policy = RefusalPolicy::EmbeddingSimilarity { threshold: 0.9 };

        assert!(policy.is_refusal(&embedder, CANNED_REFUSAL).await);
    }

    #[tokio::test]
    async fn test_embedder_failure_degrades_to_exact_comparison() {
        let embedder = MockEmbeddingClient::with_dim(4);
        embedder.fail_embeddings();
        let policy = RefusalPolicy::EmbeddingSimilarity { threshold: 0.9 };

        assert!(!policy.is_refusal(&embedder, "Sorry, I cannot share that.").await);
    }
}
