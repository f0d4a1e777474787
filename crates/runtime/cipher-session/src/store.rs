//! Last-input persistence
//!
//! Stores the most recently applied input as a small JSON document.

use crate::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STORE_VERSION: u32 = 1;

/// Serialized form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInput {
    /// Version for migration support
    pub version: u32,
    pub text: String,
}

/// Where the last input lives
pub trait LastInputStore: Send + Sync {
    /// Stored text. Empty text counts as nothing stored.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, text: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LastInputStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let stored: StoredInput = serde_json::from_str(&content)?;
        if stored.version != STORE_VERSION {
            return Err(SessionError::UnsupportedVersion(stored.version));
        }

        Ok(Some(stored.text).filter(|t| !t.is_empty()))
    }

    fn save(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&StoredInput {
            version: STORE_VERSION,
            text: text.to_string(),
        })?;

        // Write to temp file first, then rename (atomic)
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and `--no-persist`
#[derive(Debug, Default)]
pub struct MemoryStore {
    text: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LastInputStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot().clone().filter(|t| !t.is_empty()))
    }

    fn save(&self, text: &str) -> Result<()> {
        *self.slot() = Some(text.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("nested/last.json"));

        assert_eq!(store.load().unwrap(), None);
        store.save("Ship Tiny Things").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("Ship Tiny Things"));
        assert!(!dir.path().join("nested/last.json.tmp").exists());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last.json");
        FileStore::at_path(&path).save("debug the vibe").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["text"], "debug the vibe");
    }

    #[test]
    fn test_empty_text_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("last.json"));
        store.save("").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_and_future_files_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last.json");
        let store = FileStore::at_path(&path);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Serialization(_))));

        std::fs::write(&path, r#"{"version": 9, "text": "x"}"#).unwrap();
        assert!(matches!(store.load(), Err(SessionError::UnsupportedVersion(9))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_text("keep it simple");
        assert_eq!(store.load().unwrap().as_deref(), Some("keep it simple"));
        store.save("").unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.save("x").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
