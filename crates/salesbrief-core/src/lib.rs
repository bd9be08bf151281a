//! Business logic for salesbrief.
//!
//! The pipeline runs once per user action, strictly in order:
//! [`collector`] -> [`prompt`] -> [`invoker`] -> [`session`] / [`presenter`].
//! [`service::BriefService`] wires the stages together.
//!
//! Provider implementations live in `salesbrief-infra`; this crate only
//! defines the [`llm::provider::LlmProvider`] port.

pub mod collector;
pub mod invoker;
pub mod llm;
pub mod presenter;
pub mod prompt;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
