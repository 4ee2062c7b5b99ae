//! Backends - whole-document read and write adapters.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::Document;
use crate::error::StoreError;

/// Reads and writes the whole document at once.
pub trait Backend: Send + Sync {
    /// Load the persisted document. `None` if nothing has been persisted yet.
    fn read(&self) -> Result<Option<Document>, StoreError>;

    /// Replace the persisted document. Must be all-or-nothing.
    fn write(&self, document: &Document) -> Result<(), StoreError>;
}

/// JSON file backend.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so readers of the file only ever see a complete document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "db.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Backend for FileBackend {
    fn read(&self) -> Result<Option<Document>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn write(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        let staged = File::create(&temp).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(err) = staged {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "document flushed");
        Ok(())
    }
}

/// In-memory backend for tests and development.
///
/// Clone-friendly via Arc; clones share the persisted snapshot. Writes can be
/// made to fail to exercise the store's rollback path.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    persisted: Arc<RwLock<Option<Document>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted document.
    pub fn with_document(document: Document) -> Self {
        Self {
            persisted: Arc::new(RwLock::new(Some(document))),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The last successfully written document.
    pub fn persisted(&self) -> Option<Document> {
        self.persisted.read().ok().and_then(|doc| doc.clone())
    }
}

impl Backend for MemoryBackend {
    fn read(&self) -> Result<Option<Document>, StoreError> {
        let persisted = self
            .persisted
            .read()
            .map_err(|_| StoreError::LockPoisoned("backend read"))?;
        Ok(persisted.clone())
    }

    fn write(&self, document: &Document) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io("memory backend configured to fail".into()));
        }

        let mut persisted = self
            .persisted
            .write()
            .map_err(|_| StoreError::LockPoisoned("backend write"))?;
        *persisted = Some(document.clone());
        Ok(())
    }
}
