// src/compare/groups.rs

use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

use super::{KeyDiff, ACCOUNT_KEY};
use crate::error::Result;
use crate::load::load;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupComparison {
    pub source_count: usize,
    pub target_count: usize,
    pub conflicts: Vec<String>,
    pub conflict_count: usize,
    pub unique_to_source: Vec<String>,
    pub unique_to_source_count: usize,
}

/// Compare two group exports by `SamAccountName`. No attribute drift is reported.
#[instrument(level = "info", skip_all, fields(source = %source.as_ref().display(), target = %target.as_ref().display()))]
pub fn compare_groups(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<GroupComparison> {
    let source = load(source)?;
    let target = load(target)?;
    Ok(compare_group_tables(&source, &target))
}

pub fn compare_group_tables(source: &Table, target: &Table) -> GroupComparison {
    let diff = KeyDiff::new(source.key_set(ACCOUNT_KEY), target.key_set(ACCOUNT_KEY));
    let conflicts = diff.conflicts();
    let unique_to_source = diff.unique_to_source();
    info!(conflicts = conflicts.len(), "compared groups");

    GroupComparison {
        source_count: diff.source.len(),
        target_count: diff.target.len(),
        conflict_count: conflicts.len(),
        conflicts,
        unique_to_source_count: unique_to_source.len(),
        unique_to_source,
    }
}
