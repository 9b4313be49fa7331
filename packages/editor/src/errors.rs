//! Error types for the editor

use crate::mutations::MutationError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is read-only")]
    ReadOnly,

    #[error("No field is focused")]
    NoFocus,

    #[error("Not an image file: {0}")]
    NotAnImage(String),
}
