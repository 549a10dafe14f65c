//! Pipeline errors.

use super::{ConfigError, HierarchyError, TableError};

/// Errors that can occur during a refinement run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),
}

/// Result alias used at the pipeline boundary.
pub type CellhierResult<T> = Result<T, PipelineError>;
