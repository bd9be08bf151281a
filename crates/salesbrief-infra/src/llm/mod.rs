//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](salesbrief_core::llm::provider::LlmProvider)
//! implementation for OpenAI-compatible services and a factory
//! ([`create_provider`]) that builds the configured one.

pub mod openai_compat;

use secrecy::SecretString;

use salesbrief_core::llm::box_provider::BoxLlmProvider;
use salesbrief_types::config::AppConfig;
use salesbrief_types::llm::ProviderKind;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{
    self as oai_config, DEFAULT_HUGGINGFACE_MODEL, DEFAULT_OPENAI_MODEL,
};

/// Model used when the config does not name one.
pub fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::HuggingFace => DEFAULT_HUGGINGFACE_MODEL,
        ProviderKind::OpenAi => DEFAULT_OPENAI_MODEL,
    }
}

/// Create a [`BoxLlmProvider`] from the application config.
///
/// `api_key` is the already-resolved credential (see [`crate::credentials`]).
pub fn create_provider(config: &AppConfig, api_key: SecretString) -> BoxLlmProvider {
    let model = config
        .model
        .as_deref()
        .unwrap_or_else(|| default_model(config.provider));

    let mut oai = match config.provider {
        ProviderKind::HuggingFace => {
            oai_config::huggingface_defaults(api_key, model, config.inference_provider.as_deref())
        }
        ProviderKind::OpenAi => oai_config::openai_defaults(api_key, model),
    };
    if let Some(base_url) = config.base_url.as_deref() {
        oai = oai.with_base_url(base_url);
    }

    tracing::debug!(
        provider = %oai.provider_name,
        model = %oai.model,
        base_url = %oai.base_url,
        "configured completion provider"
    );

    BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("test-key".to_string())
    }

    #[test]
    fn test_create_provider_huggingface_default() {
        let provider = create_provider(&AppConfig::default(), key());
        assert_eq!(provider.name(), "huggingface");
        assert_eq!(provider.model(), "meta-llama/Meta-Llama-3-8B-Instruct:novita");
    }

    #[test]
    fn test_create_provider_openai_with_model() {
        let config = AppConfig {
            provider: ProviderKind::OpenAi,
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config, key());
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_create_provider_openai_default_model() {
        let config = AppConfig {
            provider: ProviderKind::OpenAi,
            ..Default::default()
        };
        assert_eq!(create_provider(&config, key()).model(), "gpt-4o");
    }

    #[test]
    fn test_create_provider_custom_inference_provider() {
        let config = AppConfig {
            inference_provider: Some("together".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config, key());
        assert_eq!(provider.model(), "meta-llama/Meta-Llama-3-8B-Instruct:together");
    }
}
