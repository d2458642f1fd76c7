// src/load/document.rs

use std::{fs, path::Path};
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::table::{Table, Value};

/// Read a JSON array of flat objects into a [`Table`].
pub fn load_json(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text, path)
}

/// The column set is the union of all object keys, in first-seen order.
/// Keys an object lacks read as null.
pub fn parse_json(text: &str, path: &Path) -> Result<Table> {
    let doc: serde_json::Value =
        serde_json::from_str(text).map_err(|source| InventoryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let invalid = |reason: String| InventoryError::InvalidDocument {
        path: path.to_path_buf(),
        reason,
    };

    let items = match doc {
        serde_json::Value::Array(items) => items,
        other => return Err(invalid(format!("expected an array, found {}", kind(&other)))),
    };

    let mut objects = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            serde_json::Value::Object(map) => objects.push(map),
            other => {
                return Err(invalid(format!(
                    "element {} is {}, expected an object",
                    idx,
                    kind(&other)
                )))
            }
        }
    }

    let mut columns: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    debug!(rows = objects.len(), columns = columns.len(), "parsed JSON inventory");

    let mut table = Table::new(columns.clone());
    for mut obj in objects {
        let cells = columns
            .iter()
            .map(|c| obj.remove(c).map(Value::from).unwrap_or(Value::Null))
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}

fn kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
