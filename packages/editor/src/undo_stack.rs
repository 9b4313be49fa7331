//! # Undo Stack
//!
//! Bounded history of full-document snapshots.
//!
//! ## Design
//!
//! - Every accepted mutation pushes the pre-mutation document
//! - Undo pops the most recent snapshot; there is no redo
//! - Oldest snapshots are discarded past `max_levels`
//! - History lives in memory only and starts empty on every load
//!
//! Snapshots share unchanged sections with the live document through `Arc`,
//! so pushing one costs a handful of reference-count increments.

use profile_schema::ProfileData;
use std::collections::VecDeque;

/// Undo levels kept by default
pub const DEFAULT_MAX_LEVELS: usize = 10;

#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots, most recent last
    snapshots: VecDeque<ProfileData>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with the default max levels (10)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            max_levels,
        }
    }

    /// Record the document as it was before a mutation
    pub fn push(&mut self, snapshot: ProfileData) {
        self.snapshots.push_back(snapshot);

        if self.max_levels > 0 {
            while self.snapshots.len() > self.max_levels {
                self.snapshots.pop_front();
            }
        }
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<ProfileData> {
        self.snapshots.pop_back()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.snapshots.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
