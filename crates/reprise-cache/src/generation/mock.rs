use std::sync::RwLock;

use async_trait::async_trait;

use super::client::GenerationClient;
use super::error::GenerationError;
use super::model::GeneratedAnswer;
use crate::cache::Citation;
use crate::constants::CANNED_REFUSAL;

/// Scripted generator for tests. Records every question it is asked.
#[derive(Debug)]
pub struct MockGenerationClient {
    answer: GeneratedAnswer,
    failing: bool,
    questions: RwLock<Vec<String>>,
}

impl MockGenerationClient {
    /// Always returns the given content and citations.
    pub fn with_answer(content: &str, citations: Vec<Citation>) -> Self {
        Self {
            answer: GeneratedAnswer {
                content: content.to_string(),
                citations,
            },
            failing: false,
            questions: RwLock::new(Vec::new()),
        }
    }

    /// Always returns the canned refusal with no citations.
    pub fn refusing() -> Self {
        Self::with_answer(CANNED_REFUSAL, Vec::new())
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self {
            answer: GeneratedAnswer {
                content: String::new(),
                citations: Vec::new(),
            },
            failing: true,
            questions: RwLock::new(Vec::new()),
        }
    }

    /// Questions seen so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .read()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.questions.read().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, question: &str) -> Result<GeneratedAnswer, GenerationError> {
        if let Ok(mut questions) = self.questions.write() {
            questions.push(question.to_string());
        }

        if self.failing {
            return Err(GenerationError::RequestFailed {
                message: String::from("mock generation failure"),
            });
        }

        Ok(self.answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_answer_is_returned() {
        let client = MockGenerationClient::with_answer(
            "The library opens at 8am.",
            vec![Citation::new("Library hours", "https://fupre.edu.ng/library")],
        );

        let answer = client.generate("when does the library open?").await.unwrap();

        assert_eq!(answer.content, "The library opens at 8am.");
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(client.questions(), vec!["when does the library open?"]);
    }

    #[tokio::test]
    async fn test_failing_client_still_records_questions() {
        let client = MockGenerationClient::failing();

        let result = client.generate("anything").await;

        assert!(result.is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_refusing_client_returns_the_canned_text() {
        let client = MockGenerationClient::refusing();

        let answer = client.generate("what is the meaning of life?").await.unwrap();

        assert_eq!(answer.content, CANNED_REFUSAL);
        assert!(answer.citations.is_empty());
    }
}
