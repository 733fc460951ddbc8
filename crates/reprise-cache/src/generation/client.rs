use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::error::GenerationError;
use super::model::{ChatResponse, GeneratedAnswer};
use crate::constants::{AZURE_API_VERSION, role_information};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Produces an answer for a question that missed the cache.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, question: &str) -> Result<GeneratedAnswer, GenerationError>;
}

/// Retrieval settings forwarded to the Azure AI Search data source.
///
/// The knobs beyond endpoint/key/index are passed through to the API
/// unchanged; [`SearchGrounding::new`] fills them with the service defaults.
#[derive(Debug, Clone)]
pub struct SearchGrounding {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
    pub semantic_configuration: String,
    pub query_type: String,
    pub strictness: u32,
    pub top_n_documents: u32,
    pub in_scope: bool,
}

impl SearchGrounding {
    pub fn new(endpoint: &str, api_key: &str, index_name: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            index_name: index_name.to_string(),
            semantic_configuration: "default".to_string(),
            query_type: "semantic".to_string(),
            strictness: 3,
            top_n_documents: 5,
            in_scope: true,
        }
    }
}

/// Azure OpenAI chat client grounded on an Azure AI Search index.
pub struct AzureGenerationClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    grounding: SearchGrounding,
}

impl std::fmt::Debug for AzureGenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureGenerationClient")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("index_name", &self.grounding.index_name)
            .finish_non_exhaustive()
    }
}

impl AzureGenerationClient {
    pub fn new(endpoint: &str, api_key: &str, deployment: &str, grounding: SearchGrounding) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            deployment: deployment.to_string(),
            grounding,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, AZURE_API_VERSION
        )
    }

    fn request_body(&self, question: &str) -> serde_json::Value {
        json!({
            "messages": [
                { "role": "user", "content": question }
            ],
            "max_tokens": 800,
            "temperature": 0.7,
            "top_p": 0.95,
            "frequency_penalty": 0,
            "presence_penalty": 0,
            "stop": null,
            "stream": false,
            "data_sources": [
                {
                    "type": "azure_search",
                    "parameters": {
                        "endpoint": self.grounding.endpoint,
                        "index_name": self.grounding.index_name,
                        "semantic_configuration": self.grounding.semantic_configuration,
                        "query_type": self.grounding.query_type,
                        "fields_mapping": {},
                        "in_scope": self.grounding.in_scope,
                        "role_information": role_information(),
                        "filter": null,
                        "strictness": self.grounding.strictness,
                        "top_n_documents": self.grounding.top_n_documents,
                        "authentication": {
                            "type": "api_key",
                            "key": self.grounding.api_key
                        }
                    }
                }
            ]
        })
    }
}

#[async_trait]
impl GenerationClient for AzureGenerationClient {
    async fn generate(&self, question: &str) -> Result<GeneratedAnswer, GenerationError> {
        let response = self
            .http
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&self.request_body(question))
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(GenerationError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::InvalidResponse {
                    message: e.to_string(),
                })?;

        parsed.into_generated().ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> AzureGenerationClient {
        AzureGenerationClient::new(
            "https://example.openai.azure.com/",
            "aoai-key",
            "gpt-4o",
            SearchGrounding::new("https://search.example.net", "search-key", "campus-docs"),
        )
    }

    #[test]
    fn test_completions_url_targets_deployment() {
        assert_eq!(
            test_client().completions_url(),
            format!(
                "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version={AZURE_API_VERSION}"
            )
        );
    }

    #[test]
    fn test_request_body_grounds_on_search_index() {
        let body = test_client().request_body("what is fupre");

        assert_eq!(body["messages"][0]["content"], "what is fupre");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 800);

        let source = &body["data_sources"][0];
        assert_eq!(source["type"], "azure_search");
        assert_eq!(source["parameters"]["index_name"], "campus-docs");
        assert_eq!(source["parameters"]["query_type"], "semantic");
        assert_eq!(source["parameters"]["authentication"]["key"], "search-key");
    }

    #[test]
    fn test_request_body_carries_role_information() {
        let body = test_client().request_body("anything");
        let role = body["data_sources"][0]["parameters"]["role_information"]
            .as_str()
            .unwrap();

        assert!(role.contains("Federal University of Petroleum Resources"));
    }
}
