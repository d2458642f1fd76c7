// src/analyze/stale.rs

use chrono::{DateTime, TimeDelta, Utc};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::table::{Table, Value};

pub const LAST_LOGON: &str = "LastLogonDate";
pub const DAYS_SINCE_LOGON: &str = "DaysSinceLogon";

/// Threshold used by the migration summary.
pub const DEFAULT_STALE_DAYS: i64 = 90;

/// Accounts whose last logon is older than `threshold_days` before `now`,
/// plus every account without a readable logon date.
///
/// The result carries `LastLogonDate` as parsed timestamps (null when
/// unreadable) and a `DaysSinceLogon` column, sorted most-stale first with
/// unknown staleness ahead of every known value. Returns an empty table when
/// the users table has no `LastLogonDate` column.
pub fn analyze_stale_accounts(users: &Table, threshold_days: i64, now: DateTime<Utc>) -> Table {
    let Some(logons) = users.column(LAST_LOGON) else {
        debug!("no `{}` column, skipping stale analysis", LAST_LOGON);
        return Table::default();
    };
    let parsed: Vec<Value> = logons
        .map(|v| v.to_timestamp().map(Value::Timestamp).unwrap_or(Value::Null))
        .collect();
    let cutoff = stale_cutoff(now, threshold_days);

    let mut stale = users
        .clone()
        .with_column(LAST_LOGON, parsed)
        .filter(|row| match row.get(LAST_LOGON) {
            Value::Timestamp(ts) => *ts < cutoff,
            _ => true,
        });

    let days: Vec<Value> = stale
        .rows()
        .map(|row| match row.get(LAST_LOGON) {
            Value::Timestamp(ts) => Value::Int(whole_days(now - *ts)),
            _ => Value::Null,
        })
        .collect();
    stale = stale.with_column(DAYS_SINCE_LOGON, days);
    stale.sort_rows_by(|a, b| staleness_desc(a.get(DAYS_SINCE_LOGON), b.get(DAYS_SINCE_LOGON)));

    debug!(stale = stale.len(), total = users.len(), threshold_days, "stale analysis");
    stale
}

/// `now - threshold_days`, clamped to the representable range: a threshold
/// reaching past the earliest instant leaves only unknown logons stale.
fn stale_cutoff(now: DateTime<Utc>, threshold_days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(threshold_days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or_else(|| {
            warn!(threshold_days, "stale threshold out of range, clamping cutoff");
            if threshold_days < 0 {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            }
        })
}

/// Floor of the elapsed days.
fn whole_days(elapsed: TimeDelta) -> i64 {
    elapsed.num_seconds().div_euclid(86_400)
}

/// Descending by days, nulls first.
fn staleness_desc(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => y.cmp(x),
        (Value::Int(_), _) => Ordering::Greater,
        (_, Value::Int(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
