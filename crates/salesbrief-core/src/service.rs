//! BriefService -- the collector -> assembler -> invoker -> session pipeline.

use std::sync::Arc;
use std::time::Instant;

use salesbrief_types::brief::{CompletionResult, FormInput, PromptText, UploadedArtifact};
use salesbrief_types::error::BriefError;

use crate::collector;
use crate::invoker::CompletionInvoker;
use crate::prompt;
use crate::session::{SessionId, SessionStore};

/// Runs the brief pipeline and keeps each session's latest result.
#[derive(Clone)]
pub struct BriefService {
    invoker: CompletionInvoker,
    sessions: Arc<SessionStore>,
}

impl BriefService {
    pub fn new(invoker: CompletionInvoker) -> Self {
        Self {
            invoker,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub fn invoker(&self) -> &CompletionInvoker {
        &self.invoker
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Collect and assemble without calling the provider.
    pub fn preview(
        &self,
        input: FormInput,
        artifact: Option<UploadedArtifact>,
    ) -> Result<PromptText, BriefError> {
        let collected = collector::collect(input, artifact)?;
        prompt::assemble(&collected)
    }

    /// Run the full pipeline without touching any session.
    ///
    /// Halts before invocation when the upload is rejected or the prompt is blank.
    pub async fn generate(
        &self,
        input: FormInput,
        artifact: Option<UploadedArtifact>,
    ) -> Result<CompletionResult, BriefError> {
        let start = Instant::now();
        let product_name = input.product_name.clone();

        let collected = collector::collect(input, artifact).inspect_err(|e| {
            tracing::warn!(error = %e, "upload rejected");
        })?;
        let prompt = prompt::assemble(&collected)?;

        ensure_sendable(&prompt)?;

        tracing::info!(
            provider = self.invoker.provider_name(),
            model = self.invoker.model(),
            prompt_chars = prompt.len(),
            has_file = collected.artifact.is_some(),
            "generating sales brief"
        );

        let response = self.invoker.invoke(&prompt).await?;

        tracing::info!(
            result_chars = response.content.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "sales brief generated"
        );

        Ok(CompletionResult {
            text: response.content,
            product_name,
        })
    }

    /// Run the pipeline for a session and store the result in its slot.
    ///
    /// On any error the slot keeps its previous value.
    pub async fn run(
        &self,
        session: SessionId,
        input: FormInput,
        artifact: Option<UploadedArtifact>,
    ) -> Result<CompletionResult, BriefError> {
        let result = self.generate(input, artifact).await?;
        self.sessions.set(session, result.clone());
        Ok(result)
    }

    /// Latest result held for the session. Never mutates.
    pub fn latest(&self, session: &SessionId) -> Option<CompletionResult> {
        self.sessions.get(session)
    }
}

/// Blank prompts are never sent to the provider.
pub fn ensure_sendable(prompt: &PromptText) -> Result<(), BriefError> {
    if prompt.is_blank() {
        tracing::warn!("assembled prompt is blank, skipping completion");
        return Err(BriefError::EmptyPrompt);
    }
    Ok(())
}
