//! Parent/child merging: delete a child that is a near-duplicate of a parent.

use cellhier_core::errors::HierarchyError;

use crate::graph::rewire::collapse_into_parents;
use crate::graph::{jaccard, HierarchyGraph, HierarchyStats};

use super::ShortcutRemover;

/// What a merge run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Whether any child was merged.
    pub merged: bool,
    pub terms_merged: usize,
    pub shortcuts_removed: usize,
}

#[derive(Debug, Clone)]
pub struct ParentChildMerger {
    threshold: f64,
}

impl ParentChildMerger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Merge one qualifying pair at a time, rescanning all edges after each
    /// merge, then remove the shortcuts the re-wiring introduced.
    pub fn run(&self, graph: &mut HierarchyGraph) -> Result<MergeOutcome, HierarchyError> {
        let mut outcome = MergeOutcome::default();
        while let Some(child) = self.find_similar_child(graph)? {
            tracing::debug!(child = graph.name(child), "near-duplicate of parent, merging");
            collapse_into_parents(graph, child)?;
            outcome.terms_merged += 1;
        }
        outcome.shortcuts_removed = ShortcutRemover.run(graph);
        outcome.merged = outcome.terms_merged > 0;
        Ok(outcome)
    }

    /// First child, in edge order, whose Jaccard index with its parent reaches
    /// the threshold.
    fn find_similar_child(
        &self,
        graph: &HierarchyGraph,
    ) -> Result<Option<petgraph::stable_graph::NodeIndex>, HierarchyError> {
        let stats = HierarchyStats::compute(graph);
        for (parent, child) in graph.default_edges() {
            let p = stats.require(parent)?;
            let c = stats.require(child)?;
            if jaccard(&p.genes, &c.genes) >= self.threshold {
                tracing::debug!(parent = %p.name, child = %c.name, "pair failed Jaccard");
                return Ok(Some(child));
            }
        }
        Ok(None)
    }
}
