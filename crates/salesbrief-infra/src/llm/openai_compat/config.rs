//! Configuration types and per-provider defaults for OpenAI-compatible providers.
//!
//! Each hosted service that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with the correct base
//! URL and model naming.

use secrecy::SecretString;

/// Hugging Face inference router (OpenAI-compatible).
pub const HUGGINGFACE_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default model served through the Hugging Face router.
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct";

/// Default Hugging Face inference provider the router forwards to.
pub const DEFAULT_INFERENCE_PROVIDER: &str = "novita";

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "huggingface", "openai").
    pub provider_name: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// API key for bearer authentication.
    pub api_key: SecretString,
    /// Model identifier exactly as sent on the wire.
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Point the provider at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Hugging Face router configuration.
///
/// The router selects the backing inference provider from a `:provider`
/// suffix on the model id. `inference_provider` of `None` uses
/// [`DEFAULT_INFERENCE_PROVIDER`]; an empty string sends the model id bare and
/// lets the router pick. A model that already carries a suffix is left alone.
pub fn huggingface_defaults(
    api_key: SecretString,
    model: &str,
    inference_provider: Option<&str>,
) -> OpenAiCompatConfig {
    let inference_provider = inference_provider.unwrap_or(DEFAULT_INFERENCE_PROVIDER);
    let model = if inference_provider.is_empty() || model.contains(':') {
        model.to_string()
    } else {
        format!("{model}:{inference_provider}")
    };

    OpenAiCompatConfig {
        provider_name: "huggingface".into(),
        base_url: HUGGINGFACE_BASE_URL.into(),
        api_key,
        model,
    }
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: OPENAI_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_huggingface_defaults_appends_inference_provider() {
        let config = huggingface_defaults(secret("hf_test"), DEFAULT_HUGGINGFACE_MODEL, None);
        assert_eq!(config.provider_name, "huggingface");
        assert_eq!(config.base_url, "https://router.huggingface.co/v1");
        assert_eq!(config.model, "meta-llama/Meta-Llama-3-8B-Instruct:novita");
        assert_eq!(config.api_key.expose_secret(), "hf_test");
    }

    #[test]
    fn test_huggingface_defaults_respects_explicit_suffix() {
        let config = huggingface_defaults(secret("k"), "org/model:together", Some("novita"));
        assert_eq!(config.model, "org/model:together");

        let config = huggingface_defaults(secret("k"), "org/model", Some(""));
        assert_eq!(config.model, "org/model");
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(secret("sk-test"), DEFAULT_OPENAI_MODEL);
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = openai_defaults(secret("k"), "gpt-4o").with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
