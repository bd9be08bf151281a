//! Data carried through one run of the brief pipeline.
//!
//! Everything here is ephemeral: created per request and dropped afterwards,
//! except [`CompletionResult`], which a session keeps until the next
//! successful run replaces it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six text fields collected by the form.
///
/// All fields are free-form; no format is enforced and values are kept
/// verbatim (no trimming).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub product_name: String,
    pub product_category: String,
    pub competitors: String,
    pub value_proposition: String,
    pub target_customer: String,
    /// Optional product overview text (the free-text form of the artifact).
    #[serde(default)]
    pub optional_text: Option<String>,
}

/// A file uploaded alongside the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    pub file_name: String,
    pub byte_size: usize,
    pub raw_bytes: Vec<u8>,
}

impl UploadedArtifact {
    /// Build an artifact from fully-read bytes; `byte_size` is the byte length.
    pub fn new(file_name: impl Into<String>, raw_bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            byte_size: raw_bytes.len(),
            raw_bytes,
        }
    }
}

/// Textual content of an uploaded artifact after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArtifact {
    pub file_name: String,
    pub text: String,
    /// True when the bytes were not valid UTF-8 and `text` holds the marker.
    pub binary: bool,
}

/// Form input plus the decoded artifact, ready for prompt assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedInput {
    pub form: FormInput,
    pub artifact: Option<DecodedArtifact>,
}

impl CollectedInput {
    /// Decoded artifact text, or an empty string when no file was supplied.
    pub fn artifact_text(&self) -> &str {
        self.artifact.as_ref().map(|a| a.text.as_str()).unwrap_or("")
    }
}

/// The fully rendered prompt sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptText(String);

impl PromptText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Empty or whitespace-only. Such prompts are never sent.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text returned by the completion service for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub text: String,
    /// Product name at the time of the run; names the download file.
    pub product_name: String,
}

impl CompletionResult {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
