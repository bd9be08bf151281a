//! Completion invocation: one prompt, one user-role message, one round trip.

use std::sync::Arc;
use std::time::Instant;

use tracing::{Instrument, info_span};

use salesbrief_types::brief::PromptText;
use salesbrief_types::error::BriefError;
use salesbrief_types::llm::{CompletionRequest, CompletionResponse, Message};

use crate::llm::box_provider::BoxLlmProvider;

/// Sends assembled prompts to the configured provider.
///
/// No retry and no streaming: a failed call surfaces as
/// [`BriefError::Completion`] and the caller decides what to show.
#[derive(Clone)]
pub struct CompletionInvoker {
    provider: Arc<BoxLlmProvider>,
    max_tokens: Option<u32>,
}

impl CompletionInvoker {
    pub fn new(provider: Arc<BoxLlmProvider>) -> Self {
        Self {
            provider,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Build the single-turn request for `prompt`.
    pub fn build_request(&self, prompt: &PromptText) -> CompletionRequest {
        CompletionRequest {
            model: self.provider.model().to_string(),
            messages: vec![Message::user(prompt.as_str())],
            max_tokens: self.max_tokens,
            temperature: None,
        }
    }

    /// Send the prompt and wait for the full response.
    pub async fn invoke(&self, prompt: &PromptText) -> Result<CompletionResponse, BriefError> {
        let request = self.build_request(prompt);
        let start = Instant::now();

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.stream = false,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::error!(
                    provider = self.provider.name(),
                    model = %request.model,
                    error = %e,
                    "completion request failed"
                );
                BriefError::Completion(e)
            })?;

        tracing::info!(
            provider = self.provider.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completion received"
        );

        Ok(response)
    }
}
