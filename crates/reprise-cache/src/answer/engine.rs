use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::cache::{CacheStore, Candidate, LookupConfig, SimilarityIndex, select_reusable};
use crate::embedding::EmbeddingClient;
use crate::generation::{GeneratedAnswer, GenerationClient};
use crate::vectordb::VectorIndexClient;

use super::error::{AnswerError, AnswerResult};
use super::refusal::RefusalPolicy;
use super::types::{AnswerSource, AnsweredQuestion};

/// Orchestrates the ask flow: cache lookup, generation on miss, and the
/// asynchronous write-back of fresh answers.
///
/// The cache is an accelerator, never a gatekeeper. Every cache-side
/// failure (embedding, query, write-back) is logged and absorbed; the
/// request only fails when generation itself fails.
pub struct AnswerEngine<E, G, V>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient,
    V: VectorIndexClient + 'static,
{
    embedder: Arc<E>,
    generator: Arc<G>,
    index: SimilarityIndex<V>,
    store: CacheStore<V>,
    refusal_policy: RefusalPolicy,
    config: LookupConfig,
}

impl<E, G, V> std::fmt::Debug for AnswerEngine<E, G, V>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient,
    V: VectorIndexClient + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerEngine")
            .field("refusal_policy", &self.refusal_policy)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E, G, V> AnswerEngine<E, G, V>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient,
    V: VectorIndexClient + 'static,
{
    pub fn new(
        embedder: Arc<E>,
        generator: Arc<G>,
        vector_index: Arc<V>,
        config: LookupConfig,
        refusal_policy: RefusalPolicy,
    ) -> AnswerResult<Self> {
        config.validate()?;

        let index = SimilarityIndex::new(Arc::clone(&vector_index), config.clone());
        let store = CacheStore::new(vector_index, &config.collection_name);

        Ok(Self {
            embedder,
            generator,
            index,
            store,
            refusal_policy,
            config,
        })
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Creates the answer collection when it does not exist yet.
    pub async fn ensure_collection(&self) -> AnswerResult<()> {
        self.index.ensure_collection().await?;
        Ok(())
    }

    /// Returns `true` when the vector index is reachable.
    pub async fn is_ready(&self) -> bool {
        self.index.is_ready().await
    }

    /// Answers a question, from the cache when a stored answer qualifies
    /// and from the generator otherwise.
    #[instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn answer(&self, question: &str) -> AnswerResult<AnsweredQuestion> {
        let query_embedding = match self.embedder.embed(question).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                warn!(error = %e, "Query embedding failed, generating directly");
                None
            }
        };

        if let Some(embedding) = query_embedding.as_deref() {
            if let Some(candidate) = self.lookup(question, embedding).await {
                info!(score = candidate.score, "Answer served from cache");
                return Ok(AnsweredQuestion {
                    content: candidate.record.content,
                    citations: candidate.record.citations,
                    source: AnswerSource::Cache,
                });
            }
        }

        let generated = self.generator.generate(question).await.map_err(|e| {
            AnswerError::GenerationFailed {
                reason: e.to_string(),
            }
        })?;

        if self
            .refusal_policy
            .is_refusal(self.embedder.as_ref(), &generated.content)
            .await
        {
            info!("Refusal answer not cached");
        } else {
            self.spawn_store(question, &generated);
        }

        Ok(AnsweredQuestion {
            content: generated.content,
            citations: generated.citations,
            source: AnswerSource::Generated,
        })
    }

    async fn lookup(&self, question: &str, embedding: &[f32]) -> Option<Candidate> {
        let candidates = match self.index.query(embedding).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Cache lookup failed, generating directly");
                return None;
            }
        };

        select_reusable(candidates, question, self.config.match_units)
    }

    /// Writes the answer back off the request path.
    ///
    /// The stored embedding covers the question and the answer together,
    /// so a stored point is found both by the exact question and by
    /// content-adjacent rephrasings.
    fn spawn_store(&self, question: &str, answer: &GeneratedAnswer) {
        let embedder = Arc::clone(&self.embedder);
        let store = self.store.clone();
        let question = question.to_string();
        let content = answer.content.clone();
        let citations = answer.citations.clone();

        tokio::spawn(async move {
            let text = format!("{question} {content}");
            let embedding = match embedder.embed(&text).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!(error = %e, "Write-back embedding failed, answer not cached");
                    return;
                }
            };

            if let Err(e) = store.store(&question, &content, citations, embedding).await {
                error!(error = %e, "Write-back failed, answer not cached");
            }
        });
    }
}
