//! Scripted provider for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use salesbrief_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};

use crate::llm::provider::LlmProvider;

type Outcome = Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>;

/// Returns a fixed reply (or error) and records every request.
pub struct ScriptedProvider {
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with_outcome(Box::new(move || Ok(text.clone())))
    }

    pub fn failing(err: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::with_outcome(Box::new(move || Err(err())))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        self.requests.clone()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let content = (self.outcome)()?;
        Ok(CompletionResponse {
            id: "resp-1".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}
