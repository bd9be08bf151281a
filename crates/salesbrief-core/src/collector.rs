//! Input collection: size and type checks on the optional upload, UTF-8
//! decoding with a fallback marker, and bundling with the form fields.
//!
//! Nothing here validates the text fields themselves; they are free-form and
//! passed through verbatim.

use std::path::Path;

use salesbrief_types::brief::{CollectedInput, DecodedArtifact, FormInput, UploadedArtifact};
use salesbrief_types::error::BriefError;

/// Upload cap: 2 MiB.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Substituted for the file content when the upload is not valid UTF-8.
pub const BINARY_FILE_MARKER: &str = "[Uploaded file is binary and not directly readable.]";

/// File extensions accepted at the upload boundary.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt"];

/// Reject artifacts over the size cap or without a plain-text extension.
///
/// The size check runs first so an oversized file is always reported as such.
pub fn check_artifact(artifact: &UploadedArtifact) -> Result<(), BriefError> {
    if artifact.byte_size > MAX_UPLOAD_BYTES {
        return Err(BriefError::FileTooLarge {
            size: artifact.byte_size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    let allowed = Path::new(&artifact.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if !allowed {
        return Err(BriefError::UnsupportedFileType(artifact.file_name.clone()));
    }

    Ok(())
}

/// Decode the artifact as UTF-8, falling back to [`BINARY_FILE_MARKER`].
pub fn decode_artifact(artifact: &UploadedArtifact) -> DecodedArtifact {
    match std::str::from_utf8(&artifact.raw_bytes) {
        Ok(text) => DecodedArtifact {
            file_name: artifact.file_name.clone(),
            text: text.to_string(),
            binary: false,
        },
        Err(_) => {
            tracing::warn!(
                file = %artifact.file_name,
                bytes = artifact.byte_size,
                "uploaded file is not valid UTF-8, substituting marker"
            );
            DecodedArtifact {
                file_name: artifact.file_name.clone(),
                text: BINARY_FILE_MARKER.to_string(),
                binary: true,
            }
        }
    }
}

/// Check and decode the optional artifact and pair it with the form fields.
pub fn collect(
    form: FormInput,
    artifact: Option<UploadedArtifact>,
) -> Result<CollectedInput, BriefError> {
    let artifact = match artifact {
        Some(artifact) => {
            check_artifact(&artifact)?;
            Some(decode_artifact(&artifact))
        }
        None => None,
    };

    Ok(CollectedInput { form, artifact })
}

/// Accumulates an upload chunk by chunk, failing as soon as the cap is crossed.
///
/// Used at the HTTP boundary so an oversized body is never fully buffered.
#[derive(Debug)]
pub struct UploadBuffer {
    file_name: String,
    bytes: Vec<u8>,
    limit: usize,
}

impl UploadBuffer {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self::with_limit(file_name, MAX_UPLOAD_BYTES)
    }

    pub fn with_limit(file_name: impl Into<String>, limit: usize) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Vec::new(),
            limit,
        }
    }

    /// Append a chunk. Errors with `FileTooLarge` once the total exceeds the limit.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), BriefError> {
        let size = self.bytes.len() + chunk.len();
        if size > self.limit {
            return Err(BriefError::FileTooLarge {
                size,
                max: self.limit,
            });
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    /// Finish the upload. An empty part without a file name means "no file".
    pub fn finish(self) -> Option<UploadedArtifact> {
        if self.file_name.is_empty() && self.bytes.is_empty() {
            return None;
        }
        Some(UploadedArtifact::new(self.file_name, self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormInput {
        FormInput {
            product_name: "Acme Widget".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_artifact_at_cap_is_accepted() {
        let artifact = UploadedArtifact::new("deck.txt", vec![b'a'; MAX_UPLOAD_BYTES]);
        assert!(check_artifact(&artifact).is_ok());
    }

    #[test]
    fn test_check_artifact_over_cap_is_rejected() {
        let artifact = UploadedArtifact::new("deck.txt", vec![b'a'; MAX_UPLOAD_BYTES + 1]);
        match check_artifact(&artifact) {
            Err(BriefError::FileTooLarge { size, max }) => {
                assert_eq!(size, 2_097_153);
                assert_eq!(max, 2_097_152);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_check_artifact_size_reported_before_extension() {
        let artifact = UploadedArtifact::new("deck.pdf", vec![0; 3 * 1024 * 1024]);
        assert!(matches!(
            check_artifact(&artifact),
            Err(BriefError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_check_artifact_extension_case_insensitive() {
        let artifact = UploadedArtifact::new("NOTES.TXT", b"hi".to_vec());
        assert!(check_artifact(&artifact).is_ok());

        let artifact = UploadedArtifact::new("deck.pptx", b"hi".to_vec());
        assert!(matches!(
            check_artifact(&artifact),
            Err(BriefError::UnsupportedFileType(name)) if name == "deck.pptx"
        ));

        let artifact = UploadedArtifact::new("README", b"hi".to_vec());
        assert!(check_artifact(&artifact).is_err());
    }

    #[test]
    fn test_decode_valid_utf8_verbatim() {
        let artifact = UploadedArtifact::new("spec.txt", "Spec sheet — ünïcode\n".as_bytes().to_vec());
        let decoded = decode_artifact(&artifact);
        assert_eq!(decoded.text, "Spec sheet — ünïcode\n");
        assert!(!decoded.binary);
    }

    #[test]
    fn test_decode_invalid_utf8_uses_marker() {
        let artifact = UploadedArtifact::new("deck.txt", vec![0xff, 0xfe, 0x00, 0x9f]);
        let decoded = decode_artifact(&artifact);
        assert_eq!(decoded.text, BINARY_FILE_MARKER);
        assert!(decoded.binary);
    }

    #[test]
    fn test_collect_without_artifact() {
        let collected = collect(form(), None).unwrap();
        assert!(collected.artifact.is_none());
        assert_eq!(collected.artifact_text(), "");
        assert_eq!(collected.form.product_name, "Acme Widget");
    }

    #[test]
    fn test_collect_rejects_oversized_artifact() {
        let artifact = UploadedArtifact::new("big.txt", vec![b'x'; 3 * 1024 * 1024]);
        assert!(matches!(
            collect(form(), Some(artifact)),
            Err(BriefError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_upload_buffer_stops_at_limit() {
        let mut buffer = UploadBuffer::with_limit("a.txt", 8);
        buffer.push(b"12345").unwrap();
        let err = buffer.push(b"6789").unwrap_err();
        assert!(matches!(err, BriefError::FileTooLarge { size: 9, max: 8 }));
    }

    #[test]
    fn test_upload_buffer_finish() {
        let mut buffer = UploadBuffer::new("spec.txt");
        buffer.push(b"Spec ").unwrap();
        buffer.push(b"sheet").unwrap();
        let artifact = buffer.finish().unwrap();
        assert_eq!(artifact.raw_bytes, b"Spec sheet");
        assert_eq!(artifact.byte_size, 10);

        assert!(UploadBuffer::new("").finish().is_none());
    }
}
