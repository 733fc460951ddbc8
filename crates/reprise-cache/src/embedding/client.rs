use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::error::EmbeddingError;
use crate::constants::AZURE_API_VERSION;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns text into an embedding vector.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embeds a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Azure OpenAI embeddings deployment client.
pub struct AzureEmbeddingClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
}

impl std::fmt::Debug for AzureEmbeddingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureEmbeddingClient")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .finish_non_exhaustive()
    }
}

impl AzureEmbeddingClient {
    pub fn new(endpoint: &str, api_key: &str, deployment: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            deployment: deployment.to_string(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.endpoint, self.deployment, AZURE_API_VERSION
        )
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingClient for AzureEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = json!({ "input": [text] });

        let response = self
            .http
            .post(self.embeddings_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(EmbeddingError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    message: e.to_string(),
                })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(EmbeddingError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeddings_url_targets_deployment() {
        let client = AzureEmbeddingClient::new("https://example.openai.azure.com", "key", "ada");

        assert_eq!(
            client.embeddings_url(),
            format!(
                "https://example.openai.azure.com/openai/deployments/ada/embeddings?api-version={AZURE_API_VERSION}"
            )
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = AzureEmbeddingClient::new("https://example.openai.azure.com/", "key", "ada");

        assert!(
            client
                .embeddings_url()
                .starts_with("https://example.openai.azure.com/openai/")
        );
    }
}
