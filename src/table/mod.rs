// src/table/mod.rs
//! Declared-schema inventory table: ordered rows of nullable tagged cells.

pub mod date_parser;
pub mod value;

pub use date_parser::parse_timestamp;
pub use value::{ColumnType, Value};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in declaration order.
    columns: Vec<String>,
    index: HashMap<String, usize>,
    /// Each row holds exactly `columns.len()` cells.
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    index: &'a HashMap<String, usize>,
    cells: &'a [Value],
}

impl<'a> Row<'a> {
    /// Cell under `column`; absent columns read as null.
    pub fn get(&self, column: &str) -> &'a Value {
        self.index
            .get(column)
            .and_then(|&i| self.cells.get(i))
            .unwrap_or(&NULL)
    }
}

impl Table {
    /// Empty table with the given columns. Repeated names are suffixed
    /// `.1`, `.2`, ... so every column stays addressable.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Table::default();
        for name in columns {
            let name = name.into();
            let mut unique = name.clone();
            let mut n = 1;
            while table.index.contains_key(&unique) {
                unique = format!("{}.{}", name, n);
                n += 1;
            }
            table.index.insert(unique.clone(), table.columns.len());
            table.columns.push(unique);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, padding with nulls or dropping surplus cells to fit the schema.
    pub fn push_row(&mut self, mut cells: Vec<Value>) {
        cells.resize(self.columns.len(), Value::Null);
        self.rows.push(cells);
    }

    pub fn row(&self, i: usize) -> Option<Row<'_>> {
        self.rows.get(i).map(|cells| self.view(cells))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |cells| self.view(cells))
    }

    fn view<'a>(&'a self, cells: &'a [Value]) -> Row<'a> {
        Row {
            columns: &self.columns,
            index: &self.index,
            cells,
        }
    }

    /// All cells of `column`, or `None` when the column is not declared.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let i = *self.index.get(column)?;
        Some(self.rows.iter().map(move |r| &r[i]))
    }

    /// Rows for which `keep` holds, in original order, under the same schema.
    pub fn filter<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Row<'_>) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|cells| keep(&self.view(cells)))
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
        }
    }

    /// Set `column` to `values`, replacing it if present, appending it otherwise.
    /// Missing trailing values are null.
    pub fn with_column(mut self, column: &str, values: Vec<Value>) -> Table {
        let i = match self.index.get(column) {
            Some(&i) => i,
            None => {
                self.index.insert(column.to_string(), self.columns.len());
                self.columns.push(column.to_string());
                for row in &mut self.rows {
                    row.push(Value::Null);
                }
                self.columns.len() - 1
            }
        };
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row[i] = values.next().unwrap_or(Value::Null);
        }
        self
    }

    /// Stable in-place sort of the rows.
    pub fn sort_rows_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Row<'_>, &Row<'_>) -> Ordering,
    {
        let mut rows = std::mem::take(&mut self.rows);
        let (columns, index) = (&self.columns, &self.index);
        rows.sort_by(|a, b| {
            let ra = Row { columns, index, cells: a };
            let rb = Row { columns, index, cells: b };
            compare(&ra, &rb)
        });
        self.rows = rows;
    }

    /// Distinct non-null values of `column`, stringified. Empty when the
    /// column is absent.
    pub fn key_set(&self, column: &str) -> BTreeSet<String> {
        self.column(column)
            .map(|cells| cells.filter_map(Value::key).collect())
            .unwrap_or_default()
    }

    /// First row, in load order, whose `column` stringifies to `key`.
    pub fn first_match(&self, column: &str, key: &str) -> Option<Row<'_>> {
        self.rows()
            .find(|row| row.get(column).key().as_deref() == Some(key))
    }

    /// Occurrences of each distinct non-null value of `column`.
    pub fn value_counts(&self, column: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        if let Some(cells) = self.column(column) {
            for key in cells.filter_map(Value::key) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// A table serializes as an array of row objects.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}
