//! Snapshot persistence backends.
//!
//! The store writes the full document on every successful mutation
//! (last-write-wins, single store). Backends only move bytes; the
//! malformed-snapshot-means-empty policy lives in the store.

use async_trait::async_trait;
use beacon_core::Document;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised by snapshot backends.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The storage medium could not be read or written.
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data exists but is not a well-formed document.
    #[error("Snapshot is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence backend for the status document.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    /// Load the persisted document. `Ok(None)` means no snapshot exists;
    /// `Err(Corrupt)` means one exists but cannot be parsed.
    async fn load(&self) -> Result<Option<Document>, SnapshotError>;

    /// Persist the full document, replacing any previous snapshot.
    async fn persist(&self, document: &Document) -> Result<(), SnapshotError>;
}

/// Backends shared behind an `Arc` are backends too. Lets tests keep a handle
/// to the backend they hand the store.
#[async_trait]
impl<T: SnapshotBackend + ?Sized> SnapshotBackend for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<Document>, SnapshotError> {
        (**self).load().await
    }

    async fn persist(&self, document: &Document) -> Result<(), SnapshotError> {
        (**self).persist(document).await
    }
}

// ============================================================================
// FILE BACKEND
// ============================================================================

/// Single-file JSON snapshot backend.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated snapshot behind.
pub struct FileSnapshotBackend {
    path: PathBuf,
}

impl FileSnapshotBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl SnapshotBackend for FileSnapshotBackend {
    async fn load(&self) -> Result<Option<Document>, SnapshotError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SnapshotError::Io(e)),
        };
        let document = serde_json::from_slice(&bytes)?;
        Ok(Some(document))
    }

    async fn persist(&self, document: &Document) -> Result<(), SnapshotError> {
        // Pretty-printed so the snapshot stays human-inspectable.
        let json = serde_json::to_vec_pretty(document)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

/// In-memory snapshot backend for tests. Can be flipped into a failing mode
/// to exercise the persistence-failure path.
#[derive(Default)]
pub struct InMemorySnapshotBackend {
    persisted: Mutex<Option<Document>>,
    failing: AtomicBool,
}

impl InMemorySnapshotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted document.
    pub fn with_document(document: Document) -> Self {
        Self {
            persisted: Mutex::new(Some(document)),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent persist call fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The last successfully persisted document, if any.
    pub fn persisted(&self) -> Option<Document> {
        self.persisted.lock().expect("snapshot mutex poisoned").clone()
    }
}

#[async_trait]
impl SnapshotBackend for InMemorySnapshotBackend {
    async fn load(&self) -> Result<Option<Document>, SnapshotError> {
        Ok(self.persisted.lock().expect("snapshot mutex poisoned").clone())
    }

    async fn persist(&self, document: &Document) -> Result<(), SnapshotError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SnapshotError::Io(std::io::Error::new(
                ErrorKind::Other,
                "snapshot backend in failing mode",
            )));
        }
        *self.persisted.lock().expect("snapshot mutex poisoned") = Some(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_backend_load_missing_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = FileSnapshotBackend::new(dir.path().join("status.json"));
        let loaded = backend.load().await.expect("load");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn file_backend_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = FileSnapshotBackend::new(dir.path().join("status.json"));

        let doc = Document::empty();
        backend.persist(&doc).await.expect("persist");

        let loaded = backend.load().await.expect("load");
        assert_eq!(loaded, Some(doc));
    }

    #[tokio::test]
    async fn file_backend_malformed_is_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("status.json");
        tokio::fs::write(&path, b"{not json").await.expect("write");

        let backend = FileSnapshotBackend::new(path);
        let err = backend.load().await.expect_err("should fail to parse");
        assert!(matches!(err, SnapshotError::Corrupt(_)));
    }

    #[tokio::test]
    async fn memory_backend_failing_mode() {
        let backend = InMemorySnapshotBackend::new();
        backend.set_failing(true);

        let err = backend.persist(&Document::empty()).await;
        assert!(matches!(err, Err(SnapshotError::Io(_))));
        assert!(backend.persisted().is_none());
    }
}
