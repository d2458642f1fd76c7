// src/load/mod.rs
pub mod delimited;
pub mod document;

pub use delimited::{load_csv, read_csv};
pub use document::{load_json, parse_json};

use std::path::Path;
use tracing::info;

use crate::error::{InventoryError, Result};
use crate::table::Table;

/// Export formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Detect the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("csv") {
            Ok(FileFormat::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(FileFormat::Json)
        } else {
            let shown = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            Err(InventoryError::UnsupportedFormat(shown))
        }
    }
}

/// Load an inventory export into a [`Table`], choosing the parser by extension.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let table = match FileFormat::from_path(path)? {
        FileFormat::Csv => load_csv(path)?,
        FileFormat::Json => load_json(path)?,
    };
    info!(rows = table.len(), columns = table.columns().len(), "loaded inventory");
    Ok(table)
}
