use std::sync::Arc;

use reprise::{AnswerEngine, EmbeddingClient, GenerationClient, VectorIndexClient};

/// Shared handler state: the answer engine behind every route.
pub struct GatewayState<E, G, V>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient + 'static,
    V: VectorIndexClient + 'static,
{
    pub engine: Arc<AnswerEngine<E, G, V>>,
}

impl<E, G, V> Clone for GatewayState<E, G, V>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient + 'static,
    V: VectorIndexClient + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E, G, V> GatewayState<E, G, V>
where
    E: EmbeddingClient + 'static,
    G: GenerationClient + 'static,
    V: VectorIndexClient + 'static,
{
    pub fn new(engine: Arc<AnswerEngine<E, G, V>>) -> Self {
        Self { engine }
    }
}
