//! Snapshot storage: named string slots that outlive a play session.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A key-value store of snapshot strings.
pub trait SnapshotStore {
    /// Returns the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// On-disk layout of a [`FileStore`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// TOML-file-backed store.
///
/// Every call reads the file afresh; writes land in a sibling temp file
/// that is renamed over the original. A missing file reads as empty, and
/// so does one that fails to parse, after it is moved to
/// [`FileStore::corrupt_path`].
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file need not exist yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Opening file store");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoreFile, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file missing, treating as empty");
                return Ok(StoreFile::default());
            }
            Err(e) => {
                return Err(StoreError::new(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        match toml::from_str(&content) {
            Ok(file) => Ok(file),
            Err(e) => {
                warn!(error = %e, "Store file unreadable, treating as empty");
                self.set_aside_corrupt();
                Ok(StoreFile::default())
            }
        }
    }

    /// Path an unreadable store file is moved to.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("toml.corrupt")
    }

    fn set_aside_corrupt(&self) {
        let target = self.corrupt_path();
        match std::fs::rename(&self.path, &target) {
            Ok(()) => info!(moved_to = %target.display(), "Moved unreadable store file aside"),
            Err(e) => warn!(error = %e, "Could not move unreadable store file aside"),
        }
    }

    fn write(&self, file: &StoreFile) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(file)
            .map_err(|e| StoreError::new(format!("Failed to encode store: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(|e| {
            StoreError::new(format!("Failed to write '{}': {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            warn!(error = %e, "Rename failed, leaving temp file behind");
            StoreError::new(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl SnapshotStore for FileStore {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.read()?.entries.remove(key);
        debug!(found = value.is_some(), "Loaded slot");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut file = self.read()?;
        file.entries.insert(key.to_string(), value.to_string());
        self.write(&file)?;
        debug!("Saved slot");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut file = self.read()?;
        if file.entries.remove(key).is_none() {
            debug!("Slot already empty");
            return Ok(());
        }
        self.write(&file)?;
        debug!("Removed slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("GAME").unwrap(), None);

        store.save("GAME", "value").unwrap();
        assert_eq!(store.load("GAME").unwrap().as_deref(), Some("value"));

        store.remove("GAME").unwrap();
        store.remove("GAME").unwrap();
        assert_eq!(store.load("GAME").unwrap(), None);
    }

    #[test]
    fn test_store_error_tracks_location() {
        let err = StoreError::new("boom");
        assert!(err.file.ends_with("store.rs"));
        assert!(err.to_string().contains("boom"));
    }
}
