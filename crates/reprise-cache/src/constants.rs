//! Cross-cutting, shared constants.

/// Embedding dimension produced by the Azure OpenAI embedding deployments
/// this service targets (`text-embedding-ada-002` and compatible models).
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

pub const DEFAULT_VECTOR_SIZE_U64: u64 = DEFAULT_EMBEDDING_DIM as u64;

/// Azure OpenAI REST API version used for embeddings and chat completions.
pub const AZURE_API_VERSION: &str = "2024-05-01-preview";

/// Fixed refusal returned for questions outside the assistant's scope.
///
/// Refusal suppression compares generated answers against this text, so the
/// assistant instructions in [`role_information`] require the model to emit
/// it verbatim.
pub const CANNED_REFUSAL: &str = "I'm sorry, but I can't provide that information. \
Please reach out to the university help desk for further assistance. Thank you!";

/// Instructions for the retrieval-augmented assistant, including the refusal
/// wording it must use for out-of-scope questions.
pub fn role_information() -> String {
    format!(
        "You are an AI assistant that helps people find information about the Federal \
         University of Petroleum Resources, Effurun. Only provide information found in the \
         retrieved documents. Answer questions that may seem vague as long as they relate \
         to the university. If a question is irrelevant, out of context, or cannot be \
         answered from the retrieved documents, respond politely and warmly with exactly \
         this message: {CANNED_REFUSAL}"
    )
}
