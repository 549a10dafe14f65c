//! Configuration system for cellhier.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod hierarchy_config;
pub mod refiner_config;

pub use hierarchy_config::{HierarchyConfig, RefinerOverrides};
pub use refiner_config::RefinerConfig;
