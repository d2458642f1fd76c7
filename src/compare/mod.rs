// src/compare/mod.rs
//! Source-versus-target inventory comparisons.
//!
//! Every comparison is a pure function of its two inputs: keys are extracted
//! as sets of stringified non-null values, so row order and duplicate rows
//! never change the outcome.

pub mod groups;
pub mod ous;
pub mod users;

pub use groups::{compare_group_tables, compare_groups, GroupComparison};
pub use ous::{compare_ou_tables, compare_ous, OuComparison};
pub use users::{
    compare_user_tables, compare_users, AttributeDifference, ConflictDetail, UserComparison,
    COMPARED_ATTRIBUTES,
};

use serde::Serialize;
use std::{collections::BTreeSet, path::Path, str::FromStr};

use crate::error::{InventoryError, Result};

/// Identifying key of users and groups.
pub const ACCOUNT_KEY: &str = "SamAccountName";
/// Identifying key of organizational units.
pub const OU_KEY: &str = "Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    Users,
    Groups,
    Ous,
}

impl FromStr for ComparisonKind {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "users" => Ok(ComparisonKind::Users),
            "groups" => Ok(ComparisonKind::Groups),
            "ous" => Ok(ComparisonKind::Ous),
            other => Err(InventoryError::UnknownKind(other.to_string())),
        }
    }
}

/// Result of any comparison kind; serializes as the inner report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Comparison {
    Users(UserComparison),
    Groups(GroupComparison),
    Ous(OuComparison),
}

/// Run the comparison named by `kind` over two export files.
pub fn compare(kind: &str, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<Comparison> {
    let kind: ComparisonKind = kind.parse()?;
    Ok(match kind {
        ComparisonKind::Users => Comparison::Users(compare_users(source, target)?),
        ComparisonKind::Groups => Comparison::Groups(compare_groups(source, target)?),
        ComparisonKind::Ous => Comparison::Ous(compare_ous(source, target)?),
    })
}

/// Set algebra shared by all comparison kinds.
#[derive(Debug)]
pub(crate) struct KeyDiff {
    pub source: BTreeSet<String>,
    pub target: BTreeSet<String>,
}

impl KeyDiff {
    pub fn new(source: BTreeSet<String>, target: BTreeSet<String>) -> Self {
        Self { source, target }
    }

    /// Keys in both, ascending.
    pub fn conflicts(&self) -> Vec<String> {
        self.source.intersection(&self.target).cloned().collect()
    }

    /// Keys only in the source, ascending.
    pub fn unique_to_source(&self) -> Vec<String> {
        self.source.difference(&self.target).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_known_kinds_only() {
        assert_eq!("users".parse::<ComparisonKind>().unwrap(), ComparisonKind::Users);
        assert_eq!("ous".parse::<ComparisonKind>().unwrap(), ComparisonKind::Ous);
        let err = "computers".parse::<ComparisonKind>().unwrap_err();
        assert!(matches!(err, InventoryError::UnknownKind(ref k) if k == "computers"));
        assert_eq!(err.to_string(), "Unknown type: computers");
    }

    #[test]
    fn unknown_kind_fails_before_loading() {
        let err = compare("printers", "missing-a.csv", "missing-b.csv").unwrap_err();
        assert!(matches!(err, InventoryError::UnknownKind(_)));
    }

    #[test]
    fn dispatch_serializes_inner_report() -> Result<()> {
        let dir = tempdir()?;
        let src = dir.path().join("src.json");
        let tgt = dir.path().join("tgt.json");
        fs::write(&src, r#"[{"Name":"Sales"},{"Name":"IT"}]"#)?;
        fs::write(&tgt, r#"[{"Name":"IT"}]"#)?;

        let result = compare("ous", &src, &tgt)?;
        let json = serde_json::to_value(&result)?;
        assert_eq!(
            json,
            serde_json::json!({
                "source_count": 2,
                "target_count": 1,
                "missing_in_target": ["Sales"],
                "missing_count": 1
            })
        );
        Ok(())
    }

    #[test]
    fn comparisons_are_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let src = dir.path().join("src.csv");
        let tgt = dir.path().join("tgt.csv");
        fs::write(&src, "SamAccountName,Name,Title\nalice,Sales,Dev\nbob,IT,Ops\n")?;
        fs::write(&tgt, "SamAccountName,Name,Title\nalice,IT,Lead\n")?;

        for kind in ["users", "groups", "ous"] {
            assert_eq!(compare(kind, &src, &tgt)?, compare(kind, &src, &tgt)?);
        }
        Ok(())
    }
}
