//! LlmProvider trait definition.

use salesbrief_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for hosted completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Implementations
/// live in salesbrief-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface", "openai").
    fn name(&self) -> &str;

    /// Model identifier sent when the request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// One call is one HTTP round trip: implementations must not retry.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
