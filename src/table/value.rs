// src/table/value.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use super::date_parser::parse_timestamp;

/// A single tagged cell of an inventory table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of integer and float cells. Strings are never coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Lookup key form: the stringified cell, or `None` for nulls.
    pub fn key(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Interpret the cell as a point in time. Anything that is not a
    /// timestamp or a recognised date string yields `None`.
    pub fn to_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            Value::Str(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

/// Nulls render as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Value::Float(_) => serializer.serialize_none(),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Timestamp(_) => serializer.collect_str(self),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Str(s),
            nested => Value::Str(nested.to_string()),
        }
    }
}

/// Storage type resolved for a delimited-text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Str,
}

impl ColumnType {
    /// Type of a single non-empty cell.
    pub fn of_cell(raw: &str) -> ColumnType {
        let v = raw.trim();
        if v.parse::<i64>().is_ok() {
            ColumnType::Int
        } else if v.parse::<f64>().is_ok() && v.bytes().any(|b| b.is_ascii_digit()) {
            ColumnType::Float
        } else if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false") {
            ColumnType::Bool
        } else {
            ColumnType::Str
        }
    }

    /// Widen two observed types into one that fits both.
    fn merge(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Int, Float) | (Float, Int) => Float,
            _ => Str,
        }
    }

    /// Resolve a column's type from all of its cells; empty cells are skipped.
    /// A column with no non-empty cells is a string column.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> ColumnType {
        let mut seen: Option<ColumnType> = None;
        for cell in cells {
            if cell.trim().is_empty() {
                continue;
            }
            let ty = ColumnType::of_cell(cell);
            seen = Some(match seen {
                None => ty,
                Some(prev) => prev.merge(ty),
            });
            if seen == Some(ColumnType::Str) {
                break;
            }
        }
        seen.unwrap_or(ColumnType::Str)
    }

    /// Convert a raw cell under this column type. Empty cells become null.
    pub fn parse(self, raw: &str) -> Value {
        let v = raw.trim();
        if v.is_empty() {
            return Value::Null;
        }
        let parsed = match self {
            ColumnType::Int => v.parse().ok().map(Value::Int),
            ColumnType::Float => v.parse().ok().map(Value::Float),
            ColumnType::Bool => Some(Value::Bool(v.eq_ignore_ascii_case("true"))),
            ColumnType::Str => None,
        };
        parsed.unwrap_or_else(|| Value::Str(raw.to_string()))
    }
}
