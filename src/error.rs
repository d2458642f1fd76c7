// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Hard failures of a load, comparison or analysis call.
///
/// Missing columns and unparseable cells are not errors; the analyses degrade
/// to empty results instead.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// File extension is neither `.csv` nor `.json`.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Comparison kind outside `users | groups | ous`.
    #[error("Unknown type: {0}")]
    UnknownKind(String),

    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON parse error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that is not an array of flat objects.
    #[error("invalid inventory document {path:?}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;
