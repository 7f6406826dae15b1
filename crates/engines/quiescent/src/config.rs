//! Engine configuration, loadable from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the quiescent search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Share of the remaining game clock one turn may spend
    pub time_fraction: f64,
    /// A side is quiescent while at most this fraction of its material is attacked
    pub quiescence_threshold: f64,
    /// Deepest iterative-deepening pass
    pub max_depth: u32,
    /// Ply at which the search stops extending and evaluates directly
    pub max_recursion_depth: u32,
    /// Answer straight from the history table when it has a clear favourite
    pub history_short_circuit: bool,
    /// Move the rook when a castle is applied
    pub relocate_castling_rook: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_fraction: 0.02,
            quiescence_threshold: 0.90,
            max_depth: 32,
            max_recursion_depth: 48,
            history_short_circuit: true,
            relocate_castling_rook: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("time_fraction", self.time_fraction)?;
        check_fraction("quiescence_threshold", self.quiescence_threshold)?;
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_recursion_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_recursion_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is outside (0, 1]"),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
