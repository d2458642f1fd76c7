// src/compare/ous.rs

use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

use super::{KeyDiff, OU_KEY};
use crate::error::Result;
use crate::load::load;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OuComparison {
    pub source_count: usize,
    pub target_count: usize,
    pub missing_in_target: Vec<String>,
    pub missing_count: usize,
}

/// Compare two OU exports by `Name`, listing OUs the target still lacks.
#[instrument(level = "info", skip_all, fields(source = %source.as_ref().display(), target = %target.as_ref().display()))]
pub fn compare_ous(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<OuComparison> {
    let source = load(source)?;
    let target = load(target)?;
    Ok(compare_ou_tables(&source, &target))
}

/// A table without a `Name` column contributes an empty OU set.
pub fn compare_ou_tables(source: &Table, target: &Table) -> OuComparison {
    for (side, table) in [("source", source), ("target", target)] {
        if !table.has_column(OU_KEY) {
            warn!(side, "no `{}` column, treating OU set as empty", OU_KEY);
        }
    }

    let diff = KeyDiff::new(source.key_set(OU_KEY), target.key_set(OU_KEY));
    let missing_in_target = diff.unique_to_source();
    info!(missing = missing_in_target.len(), "compared OUs");

    OuComparison {
        source_count: diff.source.len(),
        target_count: diff.target.len(),
        missing_count: missing_in_target.len(),
        missing_in_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_json;

    fn json(text: &str) -> Table {
        parse_json(text, Path::new("ous.json")).unwrap()
    }

    #[test]
    fn target_without_name_column() {
        let source = json(r#"[{"Name":"Sales"},{"Name":"Corp"},{"Name":"IT"}]"#);
        let target = json(r#"[{"DistinguishedName":"OU=Sales,DC=example,DC=com"}]"#);

        let result = compare_ou_tables(&source, &target);
        assert_eq!(result.target_count, 0);
        assert_eq!(result.source_count, 3);
        assert_eq!(result.missing_in_target, vec!["Corp", "IT", "Sales"]);
        assert_eq!(result.missing_count, 3);
    }

    #[test]
    fn lists_only_missing_ous() {
        let source = json(r#"[{"Name":"Sales"},{"Name":"IT"},{"Name":null}]"#);
        let target = json(r#"[{"Name":"IT"},{"Name":"Legal"}]"#);

        let result = compare_ou_tables(&source, &target);
        assert_eq!(result.source_count, 2);
        assert_eq!(result.target_count, 2);
        assert_eq!(result.missing_in_target, vec!["Sales"]);
        assert_eq!(result.missing_count, 1);
    }
}
