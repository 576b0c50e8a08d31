//! Error types

use thiserror::Error;

/// Errors returned when configuring a table.
///
/// Interaction itself never fails: ignored input is a no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two column descriptors share the same field key.
    #[error("Duplicate column key '{0}'")]
    DuplicateColumn(String),

    /// A key was given that names no column.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// A record could not be serialized into its field map.
    #[error("Failed to serialize record: {message}")]
    Serialize {
        /// Message from the serializer.
        message: String,
    },
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Serialize {
            message: err.to_string(),
        }
    }
}

/// Result alias for table configuration.
pub type Result<T> = std::result::Result<T, TableError>;
