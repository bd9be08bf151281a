//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves the Hugging Face inference
//! router and OpenAI from one codebase via configurable base URLs and factory
//! functions.
//!
//! Requests go straight through `reqwest`: one `POST {base_url}/chat/completions`
//! per call, no SDK-level retry or backoff, and no timeout beyond reqwest's own.

pub mod config;
pub mod types;

use secrecy::{ExposeSecret, SecretString};

use salesbrief_core::llm::provider::LlmProvider;
use salesbrief_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use self::config::OpenAiCompatConfig;
use self::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, error_message};

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the `Authorization` header. The type does NOT derive Debug.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    provider_name: String,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key,
            provider_name: config.provider_name,
            base_url: config.base_url,
            model: config.model,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build a [`ChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| ChatMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect();

        // Use the model from the request if set, otherwise fall back to config default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        ChatCompletionRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.build_request(request);

        tracing::debug!(
            provider = %self.provider_name,
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1000));
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &error_body, retry_after_ms));
        }

        let chat: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let choice = chat.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        let content = choice.message.content.ok_or(LlmError::EmptyResponse)?;

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::ContentFilter,
            _ => StopReason::EndTurn,
        };

        let usage = chat
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: chat.id,
            content,
            model: if chat.model.is_empty() { body.model } else { chat.model },
            stop_reason,
            usage,
        })
    }
}

/// Map a non-success HTTP status and body to an [`LlmError`].
fn map_status_error(
    status: reqwest::StatusCode,
    body: &str,
    retry_after_ms: Option<u64>,
) -> LlmError {
    let message = error_message(body);
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited { retry_after_ms },
        400 | 404 | 422 => LlmError::InvalidRequest(message),
        503 | 529 => LlmError::Overloaded(message),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {message}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesbrief_types::llm::Message;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn provider_at(url: &str) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(
            config::openai_defaults(secret("sk-test"), "gpt-4o").with_base_url(url),
        )
    }

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: String::new(),
            messages: vec![Message::user(prompt)],
            max_tokens: None,
            temperature: None,
        }
    }

    #[test]
    fn test_huggingface_factory() {
        let provider = OpenAiCompatibleProvider::new(config::huggingface_defaults(
            secret("hf_x"),
            config::DEFAULT_HUGGINGFACE_MODEL,
            None,
        ));
        assert_eq!(LlmProvider::name(&provider), "huggingface");
        assert_eq!(
            LlmProvider::model(&provider),
            "meta-llama/Meta-Llama-3-8B-Instruct:novita"
        );
        assert_eq!(provider.url(), "https://router.huggingface.co/v1/chat/completions");
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let provider = OpenAiCompatibleProvider::new(config::openai_defaults(secret("k"), "gpt-4o"));
        let body = provider.build_request(&request("hi"));
        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert!(!body.stream);
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Write the brief"}],
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r###"{
                    "id": "chatcmpl-1",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "gpt-4o-2024-08-06",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": "## Company Strategy"},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
                }"###,
            )
            .expect(1)
            .create_async()
            .await;

        let provider = provider_at(&server.url());
        let response = provider.complete(&request("Write the brief")).await.unwrap();

        assert_eq!(response.id, "chatcmpl-1");
        assert_eq!(response.content, "## Company Strategy");
        assert_eq!(response.model, "gpt-4o-2024-08-06");
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.input_tokens, 120);
        assert_eq!(response.usage.output_tokens, 40);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_unauthorized_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API key"}}"#)
            .expect(1)
            .create_async()
            .await;

        let err = provider_at(&server.url())
            .complete(&request("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::AuthenticationFailed));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_rate_limited_reads_retry_after() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_header("retry-after", "3")
            .create_async()
            .await;

        let err = provider_at(&server.url())
            .complete(&request("x"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_ms: Some(3000)
            }
        ));
    }

    #[tokio::test]
    async fn test_complete_huge_retry_after_saturates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_header("retry-after", "18446744073709551615")
            .create_async()
            .await;

        let err = provider_at(&server.url())
            .complete(&request("x"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_ms: Some(u64::MAX)
            }
        ));
    }

    #[tokio::test]
    async fn test_complete_server_error_maps_to_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body(r#"{"error":"internal failure"}"#)
            .expect(1)
            .create_async()
            .await;

        let err = provider_at(&server.url())
            .complete(&request("x"))
            .await
            .unwrap_err();

        match err {
            LlmError::Provider { message } => assert!(message.contains("internal failure")),
            other => panic!("expected Provider error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"id":"x","model":"m","choices":[]}"#)
            .create_async()
            .await;

        let err = provider_at(&server.url())
            .complete(&request("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_complete_malformed_body_is_deserialization_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = provider_at(&server.url())
            .complete(&request("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[test]
    fn test_map_status_error() {
        use reqwest::StatusCode;

        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS, "", Some(2000)),
            LlmError::RateLimited {
                retry_after_ms: Some(2000)
            }
        ));
        assert!(matches!(
            map_status_error(StatusCode::SERVICE_UNAVAILABLE, r#"{"error":"loading"}"#, None),
            LlmError::Overloaded(msg) if msg == "loading"
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_REQUEST, r#"{"error":{"message":"bad model"}}"#, None),
            LlmError::InvalidRequest(msg) if msg == "bad model"
        ));
    }
}
