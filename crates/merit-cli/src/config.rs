//! Configuration for the merit CLI
//! Read from ~/.merit/config/merit.toml (or `$MERIT_HOME/config/merit.toml`)

use anyhow::{anyhow, Context, Result};
use merit_algo::DispatchConfig;
use merit_core::Megawatts;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main merit configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MeritConfig {
    /// Dispatch engine limits
    #[serde(default)]
    pub dispatch: DispatchSection,
    /// Batch runner settings
    #[serde(default)]
    pub batch: BatchSection,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchSection {
    /// Numeric tolerance in MW
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum transition search depth
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Wall-clock budget per request in milliseconds (0 = no limit)
    #[serde(default = "default_time_budget_ms")]
    pub time_budget_ms: u64,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_depth: default_max_depth(),
            time_budget_ms: default_time_budget_ms(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-2
}

fn default_max_depth() -> usize {
    64
}

fn default_time_budget_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BatchSection {
    /// Worker threads (0 = one per CPU)
    #[serde(default)]
    pub threads: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line overrides for the dispatch section
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOverrides {
    pub tolerance: Option<f64>,
    pub max_depth: Option<usize>,
    pub time_budget_ms: Option<u64>,
}

impl MeritConfig {
    /// Engine configuration with command-line values taking precedence.
    pub fn dispatch_config(&self, overrides: DispatchOverrides) -> Result<DispatchConfig> {
        let tolerance = overrides.tolerance.unwrap_or(self.dispatch.tolerance);
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(anyhow!("tolerance must be a finite value >= 0, got {tolerance}"));
        }
        let budget_ms = overrides
            .time_budget_ms
            .unwrap_or(self.dispatch.time_budget_ms);
        let time_budget = (budget_ms > 0).then(|| Duration::from_millis(budget_ms));

        Ok(DispatchConfig::default()
            .with_tolerance(Megawatts(tolerance))
            .with_max_depth(overrides.max_depth.unwrap_or(self.dispatch.max_depth))
            .with_time_budget(time_budget))
    }

    /// Configured log level, if it names one
    pub fn log_level(&self) -> Option<tracing::Level> {
        self.logging.level.parse().ok()
    }
}

/// Get the merit home directory (`$MERIT_HOME`, defaulting to ~/.merit)
pub fn merit_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("MERIT_HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Cannot determine home directory"))
        .map(|h| h.join(".merit"))
}

/// Get the path to the main merit configuration file
/// Location: ~/.merit/config/merit.toml
pub fn merit_config_path() -> Result<PathBuf> {
    Ok(merit_home()?.join("config").join("merit.toml"))
}

/// Load configuration.
///
/// An explicit path must exist; the default location falls back to built-in
/// defaults when absent.
pub fn load_merit_config(explicit: Option<&Path>) -> Result<MeritConfig> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = merit_config_path()?;
            if !path.exists() {
                return Ok(MeritConfig::default());
            }
            path
        }
    };

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("reading config '{}'", config_path.display()))?;
    let config: MeritConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing config '{}'", config_path.display()))?;
    Ok(config)
}
