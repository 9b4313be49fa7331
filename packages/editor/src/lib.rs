//! # Profile Editor
//!
//! Editing engine for the company profile document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ field / image: inline editor state machines │
//! └─────────────────────────────────────────────┘
//!                     ↓ committed values
//! ┌─────────────────────────────────────────────┐
//! │ store: document + undo + mode               │
//! │  - Path-based and typed mutations           │
//! │  - Bounded snapshot history                 │
//! │  - Persist on every accepted mutation       │
//! └─────────────────────────────────────────────┘
//!                     ↓ serialized document
//! ┌─────────────────────────────────────────────┐
//! │ storage: one JSON record under a fixed key  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is the only writer**: editors hand commits back to it
//! 2. **Copy-on-write documents**: snapshots share untouched sections
//! 3. **Rejected edits are no-ops**: nothing is snapshotted or persisted
//! 4. **Last writer wins**: external records replace the document wholesale
//!
//! ## Usage
//!
//! ```rust,ignore
//! use profile_editor::{EditMode, MemoryStorage, Store};
//!
//! let mut store = Store::load(MemoryStorage::new(), EditMode::Edit);
//! store.set_path(&["services", "items", "1", "title"], "Growth marketing")?;
//! store.undo()?;
//! ```

mod errors;
mod field;
mod image;
mod mode;
mod mutations;
mod session;
mod storage;
mod store;
mod undo_stack;

pub use errors::EditorError;
pub use field::{EditKey, FieldEditor, FieldVariant};
pub use image::{encode_data_url, ImageEditor, ImageView, PickerRequest};
pub use mode::{EditMode, VIEW_PAGE};
pub use mutations::{Mutation, MutationError};
pub use session::EditSession;
pub use storage::{
    MemoryStorage, SaveIndicator, Storage, StorageError, StorageEvent, SAVE_INDICATOR_MS,
    STORAGE_KEY,
};
pub use store::Store;
pub use undo_stack::{UndoStack, DEFAULT_MAX_LEVELS};

// Re-export the document model for convenience
pub use profile_schema as schema;
pub use profile_schema::{FieldPath, FieldValue, ProfileData};
