//! Shared domain types for salesbrief.
//!
//! This crate contains the types passed between the form pipeline stages:
//! form input, uploaded artifacts, the assembled prompt, completion results,
//! provider-agnostic LLM request/response shapes, configuration, and errors.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod brief;
pub mod config;
pub mod error;
pub mod llm;
