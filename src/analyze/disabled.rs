// src/analyze/disabled.rs

use tracing::debug;

use crate::table::Table;

pub const ENABLED: &str = "Enabled";

/// Accounts whose `Enabled` cell is boolean `false`. Nulls and non-boolean
/// cells do not count. Empty table when the column is absent.
pub fn analyze_disabled_accounts(users: &Table) -> Table {
    if !users.has_column(ENABLED) {
        debug!("no `{}` column, skipping disabled analysis", ENABLED);
        return Table::default();
    }
    users.filter(|row| row.get(ENABLED).as_bool() == Some(false))
}

/// Accounts whose `Enabled` cell is boolean `true`; zero when the column is absent.
pub fn count_enabled(users: &Table) -> usize {
    users
        .column(ENABLED)
        .map(|cells| cells.filter(|v| v.as_bool() == Some(true)).count())
        .unwrap_or(0)
}
