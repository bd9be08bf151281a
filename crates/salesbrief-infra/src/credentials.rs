//! API key resolution.
//!
//! The key is read once at startup from the process environment, after an
//! optional `.env` file has been merged in. Missing or empty keys are a fatal
//! configuration error.

use std::path::PathBuf;

use secrecy::SecretString;

use salesbrief_types::config::AppConfig;
use salesbrief_types::error::ConfigError;
use salesbrief_types::llm::ProviderKind;

/// Load `.env` from the working directory (or a parent) if present.
///
/// Variables already set in the environment win over the file.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("failed to load .env file: {e}");
            None
        }
    }
}

/// Default environment variable holding the key for a provider.
pub fn default_api_key_env(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::HuggingFace => "HF_TOKEN",
        ProviderKind::OpenAi => "OPENAI_API_KEY",
    }
}

/// Name of the variable to read: the config override, else the provider default.
pub fn api_key_env_name(config: &AppConfig) -> String {
    config
        .api_key_env
        .clone()
        .unwrap_or_else(|| default_api_key_env(config.provider).to_string())
}

/// Read the API key for the configured provider.
pub fn resolve_api_key(config: &AppConfig) -> Result<SecretString, ConfigError> {
    let var = api_key_env_name(config);
    match std::env::var(&var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(ConfigError::MissingCredential(var)),
    }
}
