//! Hierarchy graph errors.

/// Errors raised by ontology construction and the refinement passes.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("input hierarchy is not a DAG: {cycle}")]
    NotADag { cycle: String },

    #[error("edge {parent} -> {child} would create a cycle")]
    CycleDetected { parent: String, child: String },

    #[error("unknown node: {name}")]
    UnknownNode { name: String },

    #[error("graph inconsistency: {details}")]
    GraphInconsistency { details: String },
}
