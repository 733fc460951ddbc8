use serde::Deserialize;

use crate::cache::Citation;

/// A generated answer with any citations the retrieval step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAnswer {
    pub content: String,
    pub citations: Vec<Citation>,
}

/// Chat completion response subset this service reads.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub context: Option<MessageContext>,
}

/// Extension block Azure attaches to messages when `data_sources` is used.
#[derive(Debug, Deserialize)]
pub struct MessageContext {
    #[serde(default)]
    pub citations: Vec<WireCitation>,
}

#[derive(Debug, Deserialize)]
pub struct WireCitation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ChatResponse {
    /// Extracts the answer text and citations from the first choice.
    pub fn into_generated(self) -> Option<GeneratedAnswer> {
        let choice = self.choices.into_iter().next()?;
        let ChatMessage { content, context } = choice.message;
        let content = content?;

        let citations = context
            .map(|c| {
                c.citations
                    .into_iter()
                    .map(|w| Citation {
                        title: w.title.unwrap_or_default(),
                        url: w.url.unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(GeneratedAnswer { content, citations })
    }
}
