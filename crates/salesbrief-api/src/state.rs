//! Application state wiring the provider and pipeline together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the web form. The provider is chosen at startup from [`AppConfig`].

use std::sync::Arc;

use salesbrief_core::invoker::CompletionInvoker;
use salesbrief_core::llm::box_provider::BoxLlmProvider;
use salesbrief_core::service::BriefService;
use salesbrief_infra::credentials::resolve_api_key;
use salesbrief_infra::llm::create_provider;
use salesbrief_types::config::AppConfig;
use salesbrief_types::error::ConfigError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub brief_service: Arc<BriefService>,
}

impl AppState {
    /// Resolve the credential and build the configured provider.
    ///
    /// A missing API key is fatal: no state, no server.
    pub fn init(config: AppConfig) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(&config)?;
        let provider = create_provider(&config, api_key);
        Ok(Self::with_provider(&config, provider))
    }

    /// Build state around an already-constructed provider.
    pub fn with_provider(config: &AppConfig, provider: BoxLlmProvider) -> Self {
        let invoker =
            CompletionInvoker::new(Arc::new(provider)).with_max_tokens(config.max_tokens);
        Self {
            brief_service: Arc::new(BriefService::new(invoker)),
        }
    }
}
