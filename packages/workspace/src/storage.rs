//! File-backed storage: one JSON file per key under a storage directory.

use profile_editor::{Storage, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// The record this process wrote last, shared with its watchers
pub(crate) type LastWritten = Arc<Mutex<Option<String>>>;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    key: String,
    last_written: LastWritten,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            dir: dir.into(),
            key,
            last_written: Arc::new(Mutex::new(None)),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the record
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }

    pub(crate) fn last_written(&self) -> LastWritten {
        self.last_written.clone()
    }

    /// Delete the record
    pub fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for FileStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path()) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file and rename, so readers never see a torn record
    fn write(&self, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let temp = self.temp_path();
        fs::write(&temp, value)?;

        // Record before the rename so the watcher can recognize its own write
        if let Ok(mut last) = self.last_written.lock() {
            *last = Some(value.to_string());
        }
        fs::rename(&temp, self.path())?;

        debug!(path = %self.path().display(), bytes = value.len(), "Wrote record");
        Ok(())
    }
}

/// Keys become file names; keep them to a safe alphabet
fn validate_key(key: &str) -> Result<(), StorageError> {
    let safe = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if safe {
        Ok(())
    } else {
        Err(StorageError::Unavailable(format!(
            "Invalid storage key: {:?}",
            key
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile_editor::STORAGE_KEY;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path(), STORAGE_KEY).unwrap();
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"), STORAGE_KEY).unwrap();

        storage.write(r#"{"hero":{}}"#).unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some(r#"{"hero":{}}"#));
        assert!(storage.path().ends_with("tivro_profile_production_v3.json"));
        assert!(!storage.temp_path().exists());

        storage.remove().unwrap();
        assert_eq!(storage.read().unwrap(), None);
        storage.remove().unwrap();
    }

    #[test]
    fn test_rejects_unsafe_keys() {
        let dir = TempDir::new().unwrap();
        assert!(FileStorage::new(dir.path(), "../escape").is_err());
        assert!(FileStorage::new(dir.path(), "").is_err());
        assert!(FileStorage::new(dir.path(), "a/b").is_err());
    }
}
