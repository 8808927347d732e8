//! Resume Text Extractor — resolves a stored PDF from its public URL, spools
//! it to a transient local file, and shells out to `pdftotext`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::storage::{ObjectStore, StorageError};

/// Storage namespace for uploaded resumes. Keys are `resumes/<filename>`.
const RESUME_KEY_PREFIX: &str = "resumes";

/// Well-known install locations probed before shelling out, so a missing
/// binary fails with a descriptive error instead of an opaque spawn failure.
const PDFTOTEXT_PATHS: &[&str] = &[
    "/usr/bin/pdftotext",
    "/usr/local/bin/pdftotext",
    "/opt/homebrew/bin/pdftotext",
];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid resume URL: {0}")]
    InvalidUrl(String),

    #[error("resume does not exist in storage at {key}")]
    ObjectMissing { key: String },

    #[error("resume object at {key} is empty")]
    EmptyObject { key: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("pdftotext is not installed at any known location")]
    ToolMissing,

    #[error("pdftotext failed: {stderr}")]
    ToolFailed { stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text-extraction capability over a local file. Behind a trait so unit
/// tests never spawn a subprocess.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Shells out to poppler's `pdftotext` with the text sent to stdout.
pub struct PdftotextExtractor;

#[async_trait]
impl TextExtractor for PdftotextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let binary = PDFTOTEXT_PATHS
            .iter()
            .find(|candidate| Path::new(candidate).exists())
            .ok_or(ExtractionError::ToolMissing)?;

        // `-` writes the extracted text to stdout
        let output = Command::new(binary).arg(path).arg("-").output().await?;

        if !output.status.success() {
            return Err(ExtractionError::ToolFailed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The extraction pipeline: derive the storage key from the resume URL,
/// fetch the PDF bytes, spool them to a transient file, run text extraction.
pub struct ResumeTextExtractor {
    store: Arc<dyn ObjectStore>,
    text: Arc<dyn TextExtractor>,
}

impl ResumeTextExtractor {
    pub fn new(store: Arc<dyn ObjectStore>, text: Arc<dyn TextExtractor>) -> Self {
        Self { store, text }
    }

    /// Returns the raw text of the resume stored at `resume_url`.
    ///
    /// Every failure is terminal for this call; the HTTP caller decides
    /// whether to surface it or proceed with an empty analysis.
    pub async fn extract_text(&self, resume_url: &str) -> Result<String, ExtractionError> {
        let key = derive_storage_key(resume_url)?;

        if !self.store.exists(&key).await? {
            return Err(ExtractionError::ObjectMissing { key });
        }

        let bytes = self.store.read(&key).await?;
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyObject { key });
        }

        // NamedTempFile removes the file on drop, error paths included, so
        // repeated invocations cannot leak disk.
        let spool = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile()?;
        tokio::fs::write(spool.path(), &bytes).await?;

        let text = self.text.extract(spool.path()).await?;

        debug!("extracted {} characters from {key}", text.len());

        Ok(text)
    }
}

/// Derives the storage key from a resume's public URL: the basename of the
/// URL path under the `resumes/` namespace.
fn derive_storage_key(resume_url: &str) -> Result<String, ExtractionError> {
    let url =
        Url::parse(resume_url).map_err(|_| ExtractionError::InvalidUrl(resume_url.to_string()))?;

    let filename = Path::new(url.path())
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ExtractionError::InvalidUrl(resume_url.to_string()))?;

    Ok(format!("{RESUME_KEY_PREFIX}/{filename}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FakeStore {
        key: String,
        bytes: Bytes,
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn exists(&self, key: &str) -> Result<bool, StorageError> {
            Ok(key == self.key)
        }

        async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
            if key == self.key {
                Ok(self.bytes.clone())
            } else {
                Err(StorageError::NotFound {
                    key: key.to_string(),
                })
            }
        }
    }

    /// Records the spool path it was handed and whether the file existed at
    /// call time, so tests can assert the transient-file lifecycle.
    struct RecordingExtractor {
        seen: Mutex<Option<(PathBuf, bool)>>,
    }

    impl RecordingExtractor {
        fn new() -> Self {
            Self {
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextExtractor for RecordingExtractor {
        async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
            *self.seen.lock().unwrap() = Some((path.to_path_buf(), path.exists()));
            Ok("raw resume text".to_string())
        }
    }

    struct FailingExtractor {
        make_err: fn() -> ExtractionError,
        seen_path: Mutex<Option<PathBuf>>,
    }

    impl FailingExtractor {
        fn new(make_err: fn() -> ExtractionError) -> Self {
            Self {
                make_err,
                seen_path: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextExtractor for FailingExtractor {
        async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
            *self.seen_path.lock().unwrap() = Some(path.to_path_buf());
            Err((self.make_err)())
        }
    }

    fn pipeline(
        store: FakeStore,
        text: Arc<dyn TextExtractor>,
    ) -> ResumeTextExtractor {
        ResumeTextExtractor::new(Arc::new(store), text)
    }

    #[test]
    fn test_storage_key_is_resumes_basename() {
        let key = derive_storage_key("https://cdn.example.com/uploads/cv-123.pdf").unwrap();
        assert_eq!(key, "resumes/cv-123.pdf");
    }

    #[test]
    fn test_storage_key_ignores_query_string() {
        let key =
            derive_storage_key("https://cdn.example.com/uploads/cv.pdf?X-Amz-Expires=3600").unwrap();
        assert_eq!(key, "resumes/cv.pdf");
    }

    #[test]
    fn test_unparseable_url_is_invalid() {
        let err = derive_storage_key("not a url").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUrl(_)));
    }

    #[test]
    fn test_url_without_basename_is_invalid() {
        let err = derive_storage_key("https://cdn.example.com/").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_missing_object_fails_before_extraction() {
        let store = FakeStore {
            key: "resumes/other.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        let extractor = pipeline(store, Arc::new(RecordingExtractor::new()));

        let err = extractor
            .extract_text("https://cdn.example.com/uploads/cv.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ObjectMissing { key } if key == "resumes/cv.pdf"));
    }

    #[tokio::test]
    async fn test_empty_object_is_an_input_error() {
        let store = FakeStore {
            key: "resumes/cv.pdf".to_string(),
            bytes: Bytes::new(),
        };
        let extractor = pipeline(store, Arc::new(RecordingExtractor::new()));

        let err = extractor
            .extract_text("https://cdn.example.com/uploads/cv.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyObject { .. }));
    }

    #[tokio::test]
    async fn test_tool_missing_is_distinct_from_storage_failures() {
        let store = FakeStore {
            key: "resumes/cv.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        let extractor = pipeline(
            store,
            Arc::new(FailingExtractor::new(|| ExtractionError::ToolMissing)),
        );

        let err = extractor
            .extract_text("https://cdn.example.com/uploads/cv.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ToolMissing));
    }

    #[tokio::test]
    async fn test_happy_path_spools_bytes_and_cleans_up() {
        let store = FakeStore {
            key: "resumes/cv.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 fake body"),
        };
        let recording = Arc::new(RecordingExtractor::new());
        let extractor = pipeline(store, recording.clone());

        let text = extractor
            .extract_text("https://cdn.example.com/uploads/cv.pdf")
            .await
            .unwrap();
        assert_eq!(text, "raw resume text");

        let (spool_path, existed_during_call) = recording.seen.lock().unwrap().take().unwrap();
        assert!(existed_during_call, "spool file must exist during extraction");
        assert!(
            !spool_path.exists(),
            "spool file must be removed before returning"
        );
    }

    #[tokio::test]
    async fn test_spool_cleanup_happens_on_extraction_failure() {
        let store = FakeStore {
            key: "resumes/cv.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        let failing = Arc::new(FailingExtractor::new(|| ExtractionError::ToolFailed {
            stderr: "Syntax Error: file is damaged".to_string(),
        }));
        let extractor = pipeline(store, failing.clone());

        let err = extractor
            .extract_text("https://cdn.example.com/uploads/cv.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ToolFailed { .. }));

        let spool_path = failing.seen_path.lock().unwrap().take().unwrap();
        assert!(
            !spool_path.exists(),
            "spool file must be removed on error exits too"
        );
    }
}
