// src/analyze/groups.rs

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::table::{Table, Value};

pub const GROUP_SCOPE: &str = "GroupScope";
pub const GROUP_CATEGORY: &str = "GroupCategory";
pub const MEMBER_COUNT: &str = "MemberCount";

/// Groups with more members than this are reported as large.
pub const LARGE_GROUP_MEMBERS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargeGroup {
    #[serde(rename = "Name")]
    pub name: Value,
    #[serde(rename = "MemberCount")]
    pub member_count: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComplexity {
    pub total_groups: usize,
    pub by_scope: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub empty_groups: usize,
    pub large_groups: Vec<LargeGroup>,
}

/// Scope/category breakdown plus empty and oversized groups.
/// Each part is empty or zero when its column is missing; non-numeric
/// `MemberCount` cells are neither empty nor large.
pub fn analyze_group_complexity(groups: &Table) -> GroupComplexity {
    let mut empty_groups = 0;
    let mut large_groups = Vec::new();

    if groups.has_column(MEMBER_COUNT) {
        for row in groups.rows() {
            match row.get(MEMBER_COUNT).as_f64() {
                Some(n) if n == 0.0 => empty_groups += 1,
                Some(n) if n > LARGE_GROUP_MEMBERS => large_groups.push(LargeGroup {
                    name: row.get("Name").clone(),
                    member_count: row.get(MEMBER_COUNT).clone(),
                }),
                _ => {}
            }
        }
    } else {
        debug!("no `{}` column, skipping membership checks", MEMBER_COUNT);
    }

    GroupComplexity {
        total_groups: groups.len(),
        by_scope: groups.value_counts(GROUP_SCOPE),
        by_type: groups.value_counts(GROUP_CATEGORY),
        empty_groups,
        large_groups,
    }
}
