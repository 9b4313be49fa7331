//! # Durable Storage
//!
//! Key/value storage for the serialized document and the "saved" indicator.
//!
//! One key holds the whole JSON document. Backends only move strings; parsing
//! and merging over defaults happen in the store.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Versioned key the profile is stored under
pub const STORAGE_KEY: &str = "tivro_profile_production_v3";

/// How long the saved indicator stays visible after the last save
pub const SAVE_INDICATOR_MS: i64 = 2000;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable string record under a fixed key
pub trait Storage {
    /// Key this storage reads and writes
    fn key(&self) -> &str;

    /// Current record, `None` when nothing has been stored yet
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&self, value: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        (**self).write(value)
    }
}

/// A change made to the stored record by another process
#[derive(Debug, Clone, PartialEq)]
pub struct StorageEvent {
    pub key: String,
    /// `None` when the record was removed
    pub new_value: Option<String>,
}

/// In-memory storage shared by every clone of the handle.
///
/// Multiple stores over clones of one `MemoryStorage` behave like tabs sharing
/// the same origin.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    key: String,
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_key(STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed the record, as if written by an earlier session
    pub fn with_value(self, value: impl Into<String>) -> Self {
        if let Ok(mut records) = self.records.lock() {
            records.insert(self.key.clone(), value.into());
        }
        self
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        let records = self
            .records
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(records.get(&self.key).cloned())
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        records.insert(self.key.clone(), value.to_string());
        Ok(())
    }
}

/// Transient "saved" indicator
#[derive(Debug, Clone, Default)]
pub struct SaveIndicator {
    last_saved: Option<DateTime<Utc>>,
}

impl SaveIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_saved(&mut self) {
        self.mark_saved_at(Utc::now());
    }

    pub fn mark_saved_at(&mut self, at: DateTime<Utc>) {
        self.last_saved = Some(at);
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Utc::now())
    }

    /// Visible until two seconds after the most recent save
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_saved {
            Some(saved) => now - saved < Duration::milliseconds(SAVE_INDICATOR_MS),
            None => false,
        }
    }
}
