// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::metrics::{histogram::DEFAULT_BINS, sessions::DEFAULT_TOP_SESSIONS};

/// Run settings. Defaults, then an optional YAML file named by
/// `RUNREPORT_CONFIG`, then individual `RUNREPORT_*` variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the whole document download.
    pub fetch_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub top_sessions: usize,
    pub histogram_bins: usize,
    /// Embed every row in the exported report.
    pub include_full_table: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
            output_dir: PathBuf::from("reports"),
            top_sessions: DEFAULT_TOP_SESSIONS,
            histogram_bins: DEFAULT_BINS,
            include_full_table: false,
            log_filter: "info,runreport=info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var("RUNREPORT_CONFIG") {
            Ok(path) => Self::from_yaml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `RUNREPORT_TIMEOUT_SECS`, `RUNREPORT_OUTPUT_DIR` and
    /// `RUNREPORT_TOP_SESSIONS` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RUNREPORT_TIMEOUT_SECS") {
            self.fetch_timeout_secs = v
                .trim()
                .parse()
                .with_context(|| format!("RUNREPORT_TIMEOUT_SECS={}", v))?;
        }
        if let Some(v) = lookup("RUNREPORT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("RUNREPORT_TOP_SESSIONS") {
            self.top_sessions = v
                .trim()
                .parse()
                .with_context(|| format!("RUNREPORT_TOP_SESSIONS={}", v))?;
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
