// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::analyze::DEFAULT_STALE_DAYS;

/// Run settings, read from an optional YAML file. Every field has a default,
/// so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Threshold for the standalone `stale` report.
    pub stale_threshold_days: i64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Single-line JSON output instead of pretty-printed.
    pub compact: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stale_threshold_days: DEFAULT_STALE_DAYS,
            log_filter: "info".to_string(),
            compact: false,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config file {:?}", path))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map(Self::from_file).unwrap_or_else(|| Ok(Self::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_yaml_keeps_defaults() -> Result<()> {
        let s = Settings::from_yaml("stale_threshold_days: 30\n")?;
        assert_eq!(s.stale_threshold_days, 30);
        assert_eq!(s.log_filter, "info");
        assert!(!s.compact);
        Ok(())
    }

    #[test]
    fn empty_and_missing_config() -> Result<()> {
        assert_eq!(Settings::from_yaml("")?, Settings::default());
        assert_eq!(Settings::load(None)?, Settings::default());
        Ok(())
    }

    #[test]
    fn reads_file_and_rejects_unknown_keys() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "compact: true\nlog_filter: debug")?;
        let s = Settings::from_file(f.path())?;
        assert!(s.compact);
        assert_eq!(s.log_filter, "debug");

        assert!(Settings::from_yaml("stale_days: 10").is_err());
        Ok(())
    }
}
