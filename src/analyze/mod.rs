// src/analyze/mod.rs
//! Single-inventory analyses feeding the migration summary.
//!
//! Analyses never fail on missing columns; they return empty results so a
//! partial export still produces a report.

pub mod disabled;
pub mod groups;
pub mod ou;
pub mod stale;
pub mod summary;

pub use disabled::{analyze_disabled_accounts, count_enabled};
pub use groups::{analyze_group_complexity, GroupComplexity, LargeGroup};
pub use ou::{analyze_ou_structure, ou_label, with_ou_column};
pub use stale::{analyze_stale_accounts, DEFAULT_STALE_DAYS};
pub use summary::{generate_migration_summary, summarize_tables, MigrationSummary, UserStats};
