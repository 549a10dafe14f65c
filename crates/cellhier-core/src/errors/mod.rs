//! Error handling for cellhier.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod hierarchy_error;
pub mod pipeline_error;
pub mod table_error;

pub use config_error::ConfigError;
pub use hierarchy_error::HierarchyError;
pub use pipeline_error::{CellhierResult, PipelineError};
pub use table_error::TableError;
