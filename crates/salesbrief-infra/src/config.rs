//! Configuration loader for salesbrief.
//!
//! Reads `salesbrief.toml` and deserializes it into [`AppConfig`]. Falls back
//! to defaults when the default file is missing or malformed.

use std::path::Path;

use salesbrief_types::config::AppConfig;
use salesbrief_types::error::ConfigError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "salesbrief.toml";

/// Load configuration from `path`.
///
/// - Missing file: defaults, unless `required` (an explicit `--config`), which errors.
/// - Unparseable file: logs a warning and returns defaults.
pub async fn load_config(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                reason: err.to_string(),
            });
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            Ok(AppConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesbrief_types::llm::ProviderKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(DEFAULT_CONFIG_FILE), false)
            .await
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn load_config_missing_required_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("nope.toml"), true).await;
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(
            &path,
            r#"
provider = "openai"
model = "gpt-4o"
api_key_env = "SALES_OPENAI_KEY"
host = "0.0.0.0"
port = 8080
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path, true).await.unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.api_key_env.as_deref(), Some("SALES_OPENAI_KEY"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path, false).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
