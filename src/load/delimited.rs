// src/load/delimited.rs

use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, warn};

use crate::error::{InventoryError, Result};
use crate::table::{ColumnType, Table};

/// Read a header-plus-rows CSV file into a [`Table`].
pub fn load_csv(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, path)
}

/// Parse CSV from any reader. `path` is only used for error context.
///
/// Column types are resolved over every cell of the column before any cell
/// is converted, so one stray non-numeric cell keeps the whole column as
/// strings.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Table> {
    let csv_err = |source| InventoryError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_err)?;
        if record.len() > headers.len() {
            warn!(
                record = idx,
                fields = record.len(),
                columns = headers.len(),
                "dropping surplus fields"
            );
        }
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let types: Vec<ColumnType> = (0..headers.len())
        .map(|i| {
            ColumnType::infer(
                raw_rows
                    .iter()
                    .map(|r| r.get(i).map(String::as_str).unwrap_or("")),
            )
        })
        .collect();
    let resolved: Vec<_> = headers.iter().zip(&types).collect();
    debug!(columns = ?resolved, "inferred column types");

    let mut table = Table::new(headers);
    for raw in raw_rows {
        let cells = types
            .iter()
            .zip(raw.iter())
            .map(|(ty, cell)| ty.parse(cell))
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}
