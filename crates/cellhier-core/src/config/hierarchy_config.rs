//! Top-level cellhier configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RefinerConfig;
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`CELLHIER_*`)
/// 3. Project config (`cellhier.toml` in the given directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub refiner: RefinerConfig,
}

/// Caller-supplied overrides, typically from a front end's flags.
#[derive(Debug, Clone, Default)]
pub struct RefinerOverrides {
    pub containment_threshold: Option<f64>,
    pub jaccard_threshold: Option<f64>,
    pub min_term_size: Option<usize>,
    pub min_diff: Option<i64>,
}

impl HierarchyConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&RefinerOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `CELLHIER_*` environment variables. Unparsable values are rejected.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_value::<f64>("CELLHIER_CONTAINMENT_THRESHOLD")? {
            self.refiner.containment_threshold = v;
        }
        if let Some(v) = env_value::<f64>("CELLHIER_JACCARD_THRESHOLD")? {
            self.refiner.jaccard_threshold = v;
        }
        if let Some(v) = env_value::<usize>("CELLHIER_MIN_TERM_SIZE")? {
            self.refiner.min_term_size = v;
        }
        if let Some(v) = env_value::<i64>("CELLHIER_MIN_DIFF")? {
            self.refiner.min_diff = v;
        }
        Ok(())
    }

    /// Apply explicit overrides; only `Some` values replace the current ones.
    pub fn apply_overrides(&mut self, overrides: &RefinerOverrides) {
        if let Some(v) = overrides.containment_threshold {
            self.refiner.containment_threshold = v;
        }
        if let Some(v) = overrides.jaccard_threshold {
            self.refiner.jaccard_threshold = v;
        }
        if let Some(v) = overrides.min_term_size {
            self.refiner.min_term_size = v;
        }
        if let Some(v) = overrides.min_diff {
            self.refiner.min_diff = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.refiner.validate()
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::ValidationFailed {
                field: name.to_string(),
                message: format!("cannot parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}
