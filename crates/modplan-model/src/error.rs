//! Collection errors

use thiserror::Error;

/// Identity violations raised by `UniqueCollection`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("duplicate entry '{key}'")]
    Duplicate { key: String },

    #[error("entry '{key}' not found")]
    NotFound { key: String },
}

impl CollectionError {
    pub fn code(&self) -> &'static str {
        match self {
            CollectionError::Duplicate { .. } => "E-COL-001",
            CollectionError::NotFound { .. } => "E-COL-002",
        }
    }
}
