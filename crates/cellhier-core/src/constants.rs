//! Shared constants for the hierarchy refiner.

/// cellhier version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default containment index threshold for adding missing ancestry edges.
pub const DEFAULT_CONTAINMENT_THRESHOLD: f64 = 0.75;

/// Default Jaccard threshold above which a child is merged into its parent.
pub const DEFAULT_JACCARD_THRESHOLD: f64 = 0.9;

/// Default minimum number of genes a term needs to survive ontology construction.
pub const DEFAULT_MIN_TERM_SIZE: usize = 4;

/// Default minimum size difference for every parent/child pair.
pub const DEFAULT_MIN_DIFF: i64 = 1;

/// Suffix of the community-detection nodes table.
pub const NODES_SUFFIX: &str = ".nodes";

/// Suffix of the community-detection edges table.
pub const EDGES_SUFFIX: &str = ".edges";

/// Suffix of the refined nodes table.
pub const PRUNED_NODES_SUFFIX: &str = ".pruned.nodes";

/// Suffix of the refined edges table.
pub const PRUNED_EDGES_SUFFIX: &str = ".pruned.edges";

/// Project config file name looked up by `HierarchyConfig::load`.
pub const CONFIG_FILE_NAME: &str = "cellhier.toml";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "CELLHIER_LOG";
