//! Cross-process change notifications for a [`FileStorage`] record.
//!
//! Writes made through the watched storage handle are suppressed, so a
//! process only hears about records other processes wrote.

use crate::storage::{FileStorage, LastWritten};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use profile_editor::{Storage, StorageEvent};
use std::ffi::OsString;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Watch error: {0}")]
    WatchError(String),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

pub struct StorageWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    storage: FileStorage,
    file_name: OsString,
    own_writes: LastWritten,
    /// Last record reported, to collapse the several events one write raises
    last_seen: Option<Option<String>>,
}

impl StorageWatcher {
    pub fn new(storage: &FileStorage) -> WatcherResult<Self> {
        std::fs::create_dir_all(storage.dir())
            .map_err(|e| WatcherError::WatchError(e.to_string()))?;

        let file_name = storage
            .path()
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| WatcherError::WatchError("Storage path has no file name".to_string()))?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        // Watch the directory; atomic renames replace the file itself
        watcher.watch(storage.dir(), RecursiveMode::NonRecursive)?;
        debug!(dir = %storage.dir().display(), "Watching storage");

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            storage: storage.clone(),
            file_name,
            own_writes: storage.last_written(),
            last_seen: None,
        })
    }

    /// Block until another process changes the record
    pub fn next_event(&mut self) -> Option<StorageEvent> {
        loop {
            let event = match self.receiver.recv() {
                Ok(Ok(event)) => event,
                Ok(Err(e)) => {
                    warn!(error = %e, "Watch error");
                    continue;
                }
                Err(_) => return None,
            };
            if let Some(change) = self.process(event) {
                return Some(change);
            }
        }
    }

    /// Wait up to `timeout` for another process to change the record
    pub fn next_event_timeout(&mut self, timeout: Duration) -> Option<StorageEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let event = match self.receiver.recv_timeout(remaining) {
                Ok(Ok(event)) => event,
                Ok(Err(e)) => {
                    warn!(error = %e, "Watch error");
                    continue;
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            };
            if let Some(change) = self.process(event) {
                return Some(change);
            }
        }
    }

    pub fn try_next_event(&mut self) -> Option<StorageEvent> {
        while let Ok(res) = self.receiver.try_recv() {
            if let Ok(event) = res {
                if let Some(change) = self.process(event) {
                    return Some(change);
                }
            }
        }
        None
    }

    fn process(&mut self, event: Event) -> Option<StorageEvent> {
        if matches!(event.kind, EventKind::Access(_)) {
            return None;
        }
        let is_our_file = event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()));
        if !is_our_file {
            return None;
        }

        let current = match self.storage.read() {
            Ok(current) => current,
            Err(e) => {
                warn!(error = %e, "Failed to read changed record");
                return None;
            }
        };

        if self.last_seen.as_ref() == Some(&current) {
            return None;
        }
        self.last_seen = Some(current.clone());

        // Our last write only explains the first change seen after it
        let own = self
            .own_writes
            .lock()
            .map(|mut last| last.take().is_some_and(|written| Some(written) == current))
            .unwrap_or(false);
        if own {
            return None;
        }

        debug!(key = self.storage.key(), "Record changed by another writer");
        Some(StorageEvent {
            key: self.storage.key().to_string(),
            new_value: current,
        })
    }
}
