// src/analyze/ou.rs

use std::collections::BTreeMap;
use tracing::debug;

use crate::table::{Table, Value};

pub const DISTINGUISHED_NAME: &str = "DistinguishedName";
pub const OU: &str = "OU";

/// OU path of a distinguished name: its `OU=` components, trimmed, in order.
/// `"Unknown"` for a null name, `"Root"` when there are no OU components.
pub fn ou_label(dn: &Value) -> String {
    if dn.is_null() {
        return "Unknown".to_string();
    }
    let dn = dn.to_string();
    let parts: Vec<&str> = dn
        .split(',')
        .map(str::trim)
        .filter(|p| p.starts_with("OU="))
        .collect();
    if parts.is_empty() {
        "Root".to_string()
    } else {
        parts.join(",")
    }
}

/// Copy of `users` with a derived `OU` column, or `None` when there is no
/// `DistinguishedName` column to derive it from.
pub fn with_ou_column(users: &Table) -> Option<Table> {
    let labels = users
        .column(DISTINGUISHED_NAME)?
        .map(|dn| Value::Str(ou_label(dn)))
        .collect();
    Some(users.clone().with_column(OU, labels))
}

/// Number of users under each OU label.
pub fn analyze_ou_structure(users: &Table) -> BTreeMap<String, usize> {
    match with_ou_column(users) {
        Some(labelled) => labelled.value_counts(OU),
        None => {
            debug!("no `{}` column, skipping OU distribution", DISTINGUISHED_NAME);
            BTreeMap::new()
        }
    }
}
