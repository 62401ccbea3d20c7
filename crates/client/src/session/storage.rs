//! Durable storage for the serialized session.
//!
//! One key, one value: the JSON of the signed-in user.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use ledgerdesk_shared::{AppError, AppResult};

/// Where the session survives a restart.
pub trait SessionStorage: Send + Sync {
    /// Stored value, `None` when nothing is stored.
    fn load(&self) -> AppResult<Option<String>>;

    /// Replaces the stored value.
    fn save(&self, value: &str) -> AppResult<()>;

    /// Removes the stored value. Removing nothing is not an error.
    fn clear(&self) -> AppResult<()>;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, action: &str, err: &std::io::Error) -> AppError {
        AppError::Storage(format!("cannot {action} {}: {err}", self.path.display()))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> AppResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.error("read", &err)),
        }
    }

    fn save(&self, value: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| self.error("create", &err))?;
        }
        std::fs::write(&self.path, value).map_err(|err| self.error("write", &err))
    }

    fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(self.error("remove", &err)),
            _ => Ok(()),
        }
    }
}

/// An in-process buffer. Clones share the buffer, so dropping one store and
/// building another over a clone behaves like a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> AppResult<Option<String>> {
        Ok(self
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, value: &str) -> AppResult<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
