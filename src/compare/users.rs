// src/compare/users.rs

use serde::Serialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, info, instrument};

use super::{KeyDiff, ACCOUNT_KEY};
use crate::error::Result;
use crate::load::load;
use crate::table::Table;

/// Attributes checked for drift on accounts present in both domains.
pub const COMPARED_ATTRIBUTES: [&str; 4] = ["DisplayName", "Email", "Department", "Title"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDifference {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictDetail {
    #[serde(rename = "SamAccountName")]
    pub sam_account_name: String,
    pub attribute_differences: BTreeMap<String, AttributeDifference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserComparison {
    pub source_count: usize,
    pub target_count: usize,
    pub conflicts: Vec<String>,
    pub conflict_count: usize,
    pub unique_to_source: Vec<String>,
    pub unique_to_source_count: usize,
    /// Present only when there is at least one conflict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_details: Option<Vec<ConflictDetail>>,
}

/// Compare two user exports by `SamAccountName`.
#[instrument(level = "info", skip_all, fields(source = %source.as_ref().display(), target = %target.as_ref().display()))]
pub fn compare_users(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<UserComparison> {
    let source = load(source)?;
    let target = load(target)?;
    Ok(compare_user_tables(&source, &target))
}

pub fn compare_user_tables(source: &Table, target: &Table) -> UserComparison {
    let diff = KeyDiff::new(source.key_set(ACCOUNT_KEY), target.key_set(ACCOUNT_KEY));
    let conflicts = diff.conflicts();
    let unique_to_source = diff.unique_to_source();

    let conflict_details = if conflicts.is_empty() {
        None
    } else {
        Some(
            conflicts
                .iter()
                .map(|account| conflict_detail(source, target, account))
                .collect(),
        )
    };

    info!(
        conflicts = conflicts.len(),
        unique_to_source = unique_to_source.len(),
        "compared users"
    );

    UserComparison {
        source_count: diff.source.len(),
        target_count: diff.target.len(),
        conflict_count: conflicts.len(),
        conflicts,
        unique_to_source_count: unique_to_source.len(),
        unique_to_source,
        conflict_details,
    }
}

/// Attribute drift for one account, taken from the first row carrying the
/// key on each side. Only attributes declared by both tables are compared.
fn conflict_detail(source: &Table, target: &Table, account: &str) -> ConflictDetail {
    let mut attribute_differences = BTreeMap::new();

    if let (Some(src), Some(tgt)) = (
        source.first_match(ACCOUNT_KEY, account),
        target.first_match(ACCOUNT_KEY, account),
    ) {
        for attr in COMPARED_ATTRIBUTES {
            if !(source.has_column(attr) && target.has_column(attr)) {
                continue;
            }
            let (s, t) = (src.get(attr).to_string(), tgt.get(attr).to_string());
            if s != t {
                debug!(account, attr, "attribute differs");
                attribute_differences.insert(
                    attr.to_string(),
                    AttributeDifference {
                        source: s,
                        target: t,
                    },
                );
            }
        }
    }

    ConflictDetail {
        sam_account_name: account.to_string(),
        attribute_differences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{read_csv, parse_json};
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn json(text: &str) -> Table {
        parse_json(text, Path::new("inline.json")).unwrap()
    }

    #[test]
    fn reports_display_name_drift() {
        let source = json(r#"[{"SamAccountName":"alice","DisplayName":"Alice A"}]"#);
        let target = json(r#"[{"SamAccountName":"alice","DisplayName":"Alice B"}]"#);

        let result = compare_user_tables(&source, &target);
        assert_eq!(result.conflicts, vec!["alice"]);
        let details = result.conflict_details.expect("conflict details");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].sam_account_name, "alice");
        assert_eq!(
            details[0].attribute_differences.get("DisplayName"),
            Some(&AttributeDifference {
                source: "Alice A".into(),
                target: "Alice B".into(),
            })
        );
    }

    #[test]
    fn set_counts_and_ordering() {
        let source = json(
            r#"[{"SamAccountName":"zed"},{"SamAccountName":"bob"},{"SamAccountName":"amy"},
                {"SamAccountName":"bob"},{"SamAccountName":null}]"#,
        );
        let target = json(r#"[{"SamAccountName":"bob"},{"SamAccountName":"zed"},{"SamAccountName":"Amy"}]"#);

        let result = compare_user_tables(&source, &target);
        assert_eq!(result.source_count, 3);
        assert_eq!(result.target_count, 3);
        assert_eq!(result.conflicts, vec!["bob", "zed"]);
        assert_eq!(result.conflict_count, result.conflicts.len());
        assert_eq!(result.unique_to_source, vec!["amy"]);
        assert_eq!(result.unique_to_source_count, result.unique_to_source.len());
    }

    #[test]
    fn conflicts_are_symmetric_but_uniques_are_not() {
        let a = json(r#"[{"SamAccountName":"a"},{"SamAccountName":"b"}]"#);
        let b = json(r#"[{"SamAccountName":"b"},{"SamAccountName":"c"}]"#);
        let ab = compare_user_tables(&a, &b);
        let ba = compare_user_tables(&b, &a);
        assert_eq!(ab.conflicts, ba.conflicts);
        assert_eq!(ab.unique_to_source, vec!["a"]);
        assert_eq!(ba.unique_to_source, vec!["c"]);
    }

    #[test]
    fn no_conflicts_omits_details() -> Result<()> {
        let a = json(r#"[{"SamAccountName":"a"}]"#);
        let b = json(r#"[{"SamAccountName":"b"}]"#);
        let result = compare_user_tables(&a, &b);
        assert!(result.conflict_details.is_none());
        let value = serde_json::to_value(&result)?;
        assert!(value.get("conflict_details").is_none());
        Ok(())
    }

    #[test]
    fn only_shared_attribute_columns_are_compared() {
        let source = json(
            r#"[{"SamAccountName":"alice","Email":"a@old","Title":"Dev","Department":null},
                {"SamAccountName":"alice","Email":"second-row","Title":"X","Department":"IT"}]"#,
        );
        let target = json(r#"[{"SamAccountName":"alice","Email":"a@new","Department":""}]"#);

        let details = compare_user_tables(&source, &target).conflict_details.unwrap();
        let diffs = &details[0].attribute_differences;
        // Title is absent from the target table; null and "" stringify alike.
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs["Email"].source, "a@old");
        assert_eq!(diffs["Email"].target, "a@new");
    }

    #[test]
    fn identical_conflicts_have_empty_difference_maps() {
        let t = json(r#"[{"SamAccountName":"alice","DisplayName":"Alice"}]"#);
        let details = compare_user_tables(&t, &t).conflict_details.unwrap();
        assert!(details[0].attribute_differences.is_empty());
    }

    #[test]
    fn csv_and_json_exports_compare_identically() -> Result<()> {
        let dir = tempdir()?;
        let src_csv = dir.path().join("src.csv");
        let src_json = dir.path().join("src.json");
        let tgt = dir.path().join("tgt.json");
        fs::write(
            &src_csv,
            "SamAccountName,DisplayName,Department\nalice,Alice A,IT\nbob,Bob,HR\n",
        )?;
        fs::write(
            &src_json,
            r#"[{"SamAccountName":"alice","DisplayName":"Alice A","Department":"IT"},
                {"SamAccountName":"bob","DisplayName":"Bob","Department":"HR"}]"#,
        )?;
        fs::write(
            &tgt,
            r#"[{"SamAccountName":"alice","DisplayName":"Alice B","Department":"IT"}]"#,
        )?;

        assert_eq!(compare_users(&src_csv, &tgt)?, compare_users(&src_json, &tgt)?);
        Ok(())
    }

    #[test]
    fn numeric_keys_match_across_formats() {
        let source = read_csv("SamAccountName\n1001\n".as_bytes(), Path::new("s.csv")).unwrap();
        let target = json(r#"[{"SamAccountName":1001}]"#);
        assert_eq!(compare_user_tables(&source, &target).conflicts, vec!["1001"]);
    }
}
