// src/analyze/summary.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{info, instrument};

use super::disabled::{analyze_disabled_accounts, count_enabled};
use super::groups::{analyze_group_complexity, GroupComplexity};
use super::ou::analyze_ou_structure;
use super::stale::{analyze_stale_accounts, DEFAULT_STALE_DAYS};
use crate::error::Result;
use crate::load::load;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub stale_90_days: usize,
}

/// Pre-migration report over a users export and a groups export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationSummary {
    /// The `now` the report was assembled against; with a fixed reference
    /// time this is that time, not the wall clock.
    pub generated_at: DateTime<Utc>,
    pub user_stats: UserStats,
    pub group_stats: GroupComplexity,
    pub ou_distribution: BTreeMap<String, usize>,
    pub recommendations: Vec<String>,
}

#[instrument(level = "info", skip_all, fields(users = %users.as_ref().display(), groups = %groups.as_ref().display()))]
pub fn generate_migration_summary(
    users: impl AsRef<Path>,
    groups: impl AsRef<Path>,
    now: DateTime<Utc>,
) -> Result<MigrationSummary> {
    let users = load(users)?;
    let groups = load(groups)?;
    Ok(summarize_tables(&users, &groups, now))
}

/// Staleness is always measured against the 90-day threshold here.
pub fn summarize_tables(users: &Table, groups: &Table, now: DateTime<Utc>) -> MigrationSummary {
    let stale = analyze_stale_accounts(users, DEFAULT_STALE_DAYS, now);
    let disabled = analyze_disabled_accounts(users);
    let group_stats = analyze_group_complexity(groups);
    let ou_distribution = analyze_ou_structure(users);

    let user_stats = UserStats {
        total: users.len(),
        enabled: count_enabled(users),
        disabled: disabled.len(),
        stale_90_days: stale.len(),
    };
    let recommendations = recommendations(&user_stats, &group_stats);
    info!(
        users = user_stats.total,
        groups = group_stats.total_groups,
        recommendations = recommendations.len(),
        "built migration summary"
    );

    MigrationSummary {
        generated_at: now,
        user_stats,
        group_stats,
        ou_distribution,
        recommendations,
    }
}

fn recommendations(users: &UserStats, groups: &GroupComplexity) -> Vec<String> {
    let mut out = Vec::new();

    if users.stale_90_days > 0 {
        let pct = users.stale_90_days as f64 / users.total as f64 * 100.0;
        out.push(format!(
            "{} accounts ({:.1}%) are stale (no logon in {} days). \
             Consider excluding these from migration.",
            users.stale_90_days, pct, DEFAULT_STALE_DAYS
        ));
    }

    if users.disabled > 0 {
        out.push(format!(
            "{} accounts are disabled. Review whether these need to be migrated.",
            users.disabled
        ));
    }

    if groups.empty_groups > 0 {
        out.push(format!(
            "{} groups have no members. Consider skipping empty groups.",
            groups.empty_groups
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn full_summary_from_files() -> Result<()> {
        crate::logging::init_test_logging();
        let dir = tempdir()?;
        let users = dir.path().join("users.csv");
        let groups = dir.path().join("groups.json");
        fs::write(
            &users,
            "SamAccountName,Enabled,LastLogonDate,DistinguishedName\n\
             alice,True,2024-05-30 09:00:00,\"CN=alice,OU=Sales,DC=x\"\n\
             bob,False,2023-01-01 09:00:00,\"CN=bob,OU=Sales,DC=x\"\n\
             carol,True,,\"CN=carol,CN=Users,DC=x\"\n",
        )?;
        fs::write(
            &groups,
            r#"[{"Name":"G1","GroupScope":"Global","MemberCount":0},
                {"Name":"G2","GroupScope":"Global","MemberCount":150}]"#,
        )?;

        let summary = generate_migration_summary(&users, &groups, now())?;
        assert_eq!(
            summary.user_stats,
            UserStats {
                total: 3,
                enabled: 2,
                disabled: 1,
                stale_90_days: 2,
            }
        );
        assert_eq!(summary.group_stats.empty_groups, 1);
        assert_eq!(summary.ou_distribution["OU=Sales"], 2);
        assert_eq!(summary.ou_distribution["Root"], 1);
        assert_eq!(
            summary.recommendations,
            vec![
                "2 accounts (66.7%) are stale (no logon in 90 days). \
                 Consider excluding these from migration.",
                "1 accounts are disabled. Review whether these need to be migrated.",
                "1 groups have no members. Consider skipping empty groups.",
            ]
        );
        assert_eq!(summary.generated_at, now());

        let json = serde_json::to_value(&summary)?;
        assert_eq!(json["generated_at"], "2024-06-01T00:00:00Z");
        assert_eq!(json["group_stats"]["by_scope"]["Global"], 2);
        Ok(())
    }

    #[test]
    fn repeated_summaries_are_identical() -> Result<()> {
        let dir = tempdir()?;
        let users = dir.path().join("users.json");
        let groups = dir.path().join("groups.csv");
        fs::write(
            &users,
            r#"[{"SamAccountName":"a","Enabled":false,"LastLogonDate":null,
                 "DistinguishedName":"CN=a,OU=IT,DC=x"},
                {"SamAccountName":"b","Enabled":true,"LastLogonDate":"2024-05-01T00:00:00Z"}]"#,
        )?;
        fs::write(&groups, "Name,GroupScope,MemberCount
G1,Global,0
G2,Universal,120
")?;

        let first = generate_migration_summary(&users, &groups, now())?;
        let second = generate_migration_summary(&users, &groups, now())?;
        assert_eq!(first, second);
        assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
        Ok(())
    }

    #[test]
    fn clean_inventory_has_no_recommendations() {
        let users = Table::new(["SamAccountName"]);
        let groups = Table::new(["Name"]);
        let summary = summarize_tables(&users, &groups, now());
        assert!(summary.recommendations.is_empty());
        assert_eq!(summary.user_stats.enabled, 0);
        assert!(summary.ou_distribution.is_empty());
    }

    #[test]
    fn recommendations_keep_fixed_order() {
        let users = UserStats {
            total: 8,
            enabled: 0,
            disabled: 3,
            stale_90_days: 1,
        };
        let groups = analyze_group_complexity(&Table::default());
        let recs = recommendations(&users, &groups);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("1 accounts (12.5%) are stale"));
        assert!(recs[1].starts_with("3 accounts are disabled"));
    }
}
