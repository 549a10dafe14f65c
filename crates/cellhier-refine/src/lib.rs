//! # cellhier-refine
//!
//! The hierarchy refinement engine. Builds a term/gene DAG (`petgraph`) from
//! community-detection tables, then reorganizes, merges, collapses, and
//! prunes it into a minimal non-redundant hierarchy.

pub mod engine;
pub mod export;
pub mod graph;
pub mod ontology;
pub mod passes;

pub use engine::{HierarchyRefiner, RefinementOutcome, RefinementReport, RefinementStage};
pub use export::{HierarchyExporter, RefinedHierarchy};
pub use graph::{HierarchyGraph, HierarchyStats, NodeKey, TermStats};
pub use ontology::{OntologyBuilder, OntologyTable};
pub use passes::{
    ContainmentReorganizer, ParentChildMerger, RedundancyCollapser, ShortcutRemover,
};
