use thiserror::Error;

use crate::llm::LlmError;

/// Errors from one run of the brief pipeline.
#[derive(Debug, Error)]
pub enum BriefError {
    #[error("File too large! Please upload a file smaller than 2 MB.")]
    FileTooLarge { size: usize, max: usize },

    #[error("unsupported file type '{0}': only .txt files are accepted")]
    UnsupportedFileType(String),

    #[error("Please enter a prompt or upload a file before running.")]
    EmptyPrompt,

    #[error("template error: {0}")]
    Template(String),

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),
}

/// Errors raised while resolving startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found in the environment or .env file")]
    MissingCredential(String),

    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },
}
