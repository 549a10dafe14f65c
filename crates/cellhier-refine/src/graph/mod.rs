//! The owned hierarchy graph and the helpers every pass shares.

pub mod dag_enforcement;
pub mod hierarchy_graph;
pub mod rewire;
pub mod stats;

pub use hierarchy_graph::{HierarchyGraph, NodeKey};
pub use stats::{containment_index, jaccard, HierarchyStats, TermStats};
