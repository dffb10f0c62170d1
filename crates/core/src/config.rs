// crates/core/src/config.rs
//! User configuration loaded from `<data dir>/config.toml`.
//!
//! ```toml
//! max_lines = 1000
//! history_limit = 5
//! strict_min_structure = 3.0
//! strict_min_context = 2.0
//! ranking_scheme = "legacy"   # or "v2"
//! report_days = 30
//! top_sessions_limit = 10
//! ```
//!
//! Every key is optional; a missing file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::scoring::{RankingScheme, DEFAULT_MAX_LINES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Productivity normalization ceiling for the v2 composite.
    pub max_lines: i64,
    /// Best prompts consulted by the coach.
    pub history_limit: usize,
    pub strict_min_structure: f64,
    pub strict_min_context: f64,
    pub ranking_scheme: RankingScheme,
    /// Window of the daily-activity section, in days.
    pub report_days: u32,
    pub top_sessions_limit: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            history_limit: 5,
            strict_min_structure: 3.0,
            strict_min_context: 2.0,
            ranking_scheme: RankingScheme::Legacy,
            report_days: 30,
            top_sessions_limit: 10,
        }
    }
}

impl CoachConfig {
    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, or defaults when there is no home directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        match crate::paths::config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
