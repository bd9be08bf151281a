//! Infrastructure implementations for salesbrief.
//!
//! - `llm`: OpenAI-compatible HTTP provider and the provider factory
//! - `credentials`: API key resolution from the environment / `.env`
//! - `config`: `salesbrief.toml` loader

pub mod config;
pub mod credentials;
pub mod llm;
