//! # cellhier-core
//!
//! Foundation crate for the cellhier hierarchy refiner.
//! Defines the flat-table models, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{HierarchyConfig, RefinerConfig};
pub use errors::{CellhierResult, ConfigError, HierarchyError, PipelineError, TableError};
pub use models::{EdgeKind, EdgeRow, TermRow};
