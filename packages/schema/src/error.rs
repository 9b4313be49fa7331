use thiserror::Error;

pub type PathResult<T> = Result<T, PathError>;

/// Errors resolving or applying a field path against the schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Empty path")]
    Empty,

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Unknown field '{field}' in {parent}")]
    UnknownField { parent: String, field: String },

    #[error("Path '{0}' does not name a field")]
    Incomplete(String),

    #[error("Invalid index '{0}'")]
    InvalidIndex(String),

    #[error("Index {index} out of range for {collection} (len {len})")]
    IndexOutOfRange {
        collection: String,
        index: usize,
        len: usize,
    },

    #[error("Type mismatch at {path}: expected {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("Invalid value at {path}: {message}")]
    InvalidValue { path: String, message: String },
}

impl PathError {
    pub fn unknown_field(parent: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            parent: parent.into(),
            field: field.into(),
        }
    }

    pub fn out_of_range(collection: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            collection: collection.into(),
            index,
            len,
        }
    }

    pub fn type_mismatch(path: impl ToString, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected,
        }
    }

    pub fn invalid_value(path: impl ToString, message: impl ToString) -> Self {
        Self::InvalidValue {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}
