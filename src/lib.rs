//! Directory-inventory comparison and migration-readiness analysis.
//!
//! Exports of users, groups and organizational units (CSV or JSON) are loaded
//! into [`table::Table`]s, then either compared source-against-target
//! ([`compare`]) or analysed on their own ([`analyze`]). Every operation is a
//! pure function of its input files and, for staleness, an explicit `now`.

pub mod analyze;
pub mod compare;
pub mod config;
pub mod error;
pub mod load;
pub mod logging;
pub mod table;

pub use error::{InventoryError, Result};
