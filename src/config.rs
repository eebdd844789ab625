//! Engine configuration, loadable from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{MystError, MystResult};

/// Tunables for the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tolerance when comparing accumulated path weights.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
    /// Resolve equal-weight single-pair paths to the lexicographically smallest one.
    #[serde(default = "default_true")]
    pub break_path_ties: bool,
    /// Fill the all-pairs table (and the most separated pair) during `process`.
    #[serde(default = "default_true")]
    pub compute_all_pairs: bool,
}

fn default_weight_tolerance() -> f64 {
    1e-9
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weight_tolerance: default_weight_tolerance(),
            break_path_ties: true,
            compute_all_pairs: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> MystResult<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| MystError::Config(e.to_string()))?;
        if !config.weight_tolerance.is_finite() || config.weight_tolerance < 0.0 {
            return Err(MystError::Config(format!(
                "weight_tolerance must be a non-negative finite number, got {}",
                config.weight_tolerance
            )));
        }
        Ok(config)
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> MystResult<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        MystError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    EngineConfig::from_toml_str(&content)
}
