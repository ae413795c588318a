//! Error types for the data-loader crate.
//!
//! Only whole-input problems are errors here. A single malformed user record
//! never fails a load, it is coerced to defaults instead (see `index`).

use thiserror::Error;

/// Errors that can occur while reading the target file or the user catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Content is not valid JSON
    #[error("JSON parse error in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog document parsed, but its root is not an array of records
    #[error("Expected a collection of user records in {file}, found {found}")]
    NotACollection { file: String, found: String },

    /// A required field is absent from a document
    #[error("Missing field `{field}` in {file}")]
    MissingField { file: String, field: String },

    /// A field had a value of the wrong type
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
