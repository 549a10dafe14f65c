//! Refinement thresholds.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// The four scalar parameters of one refinement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinerConfig {
    /// Containment index at or above which a missing ancestry edge is added.
    pub containment_threshold: f64,
    /// Jaccard index at or above which a child term is merged into its parent.
    pub jaccard_threshold: f64,
    /// Terms with fewer genes are dropped before the ontology is built.
    pub min_term_size: usize,
    /// Minimum gene-count difference required for every parent/child pair.
    pub min_diff: i64,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            containment_threshold: constants::DEFAULT_CONTAINMENT_THRESHOLD,
            jaccard_threshold: constants::DEFAULT_JACCARD_THRESHOLD,
            min_term_size: constants::DEFAULT_MIN_TERM_SIZE,
            min_diff: constants::DEFAULT_MIN_DIFF,
        }
    }
}

impl RefinerConfig {
    /// Both thresholds in `(0, 1]`, `min_term_size >= 1`, `min_diff >= 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("refiner.containment_threshold", self.containment_threshold)?;
        check_unit_interval("refiner.jaccard_threshold", self.jaccard_threshold)?;
        if self.min_term_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "refiner.min_term_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.min_diff < 0 {
            return Err(ConfigError::ValidationFailed {
                field: "refiner.min_diff".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be in (0, 1], got {value}"),
        })
    }
}
