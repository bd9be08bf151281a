//! Configuration types for salesbrief.
//!
//! `AppConfig` represents the optional `salesbrief.toml` file. Every field has
//! a default, so an empty or missing file yields a working Hugging Face setup.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderKind;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which hosted completion service to call.
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model identifier; `None` uses the provider default.
    #[serde(default)]
    pub model: Option<String>,

    /// Hugging Face inference provider suffix (e.g. "novita").
    #[serde(default)]
    pub inference_provider: Option<String>,

    /// Override the provider base URL (proxies, local gateways).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key; `None` uses the provider default.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Upper bound on generated tokens; `None` leaves it to the provider.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Address the web form binds to.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            inference_provider: None,
            base_url: None,
            api_key_env: None,
            max_tokens: None,
            host: default_host(),
            port: default_port(),
        }
    }
}
