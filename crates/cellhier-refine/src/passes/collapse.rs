//! Redundancy collapsing: a child must be at least `min_diff` genes smaller
//! than each of its parents.

use petgraph::stable_graph::NodeIndex;

use cellhier_core::errors::HierarchyError;

use crate::graph::rewire::collapse_into_parents;
use crate::graph::{HierarchyGraph, HierarchyStats};

/// What a collapse run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseOutcome {
    pub terms_collapsed: usize,
}

#[derive(Debug, Clone)]
pub struct RedundancyCollapser {
    min_diff: i64,
}

impl RedundancyCollapser {
    pub fn new(min_diff: i64) -> Self {
        Self { min_diff }
    }

    pub fn run(&self, graph: &mut HierarchyGraph) -> Result<CollapseOutcome, HierarchyError> {
        let mut outcome = CollapseOutcome::default();
        loop {
            let candidates = self.candidates(graph)?;
            let Some(&(parent, child)) = candidates.first() else {
                tracing::debug!("nothing to collapse");
                break;
            };
            tracing::debug!(
                parent = graph.name(parent),
                child = graph.name(child),
                candidates = candidates.len(),
                "redundant pair, removing child"
            );
            collapse_into_parents(graph, child)?;
            outcome.terms_collapsed += 1;
        }
        Ok(outcome)
    }

    /// Every `default` edge whose size difference is below `min_diff`, in edge order.
    pub fn candidates(
        &self,
        graph: &HierarchyGraph,
    ) -> Result<Vec<(NodeIndex, NodeIndex)>, HierarchyError> {
        let stats = HierarchyStats::compute(graph);
        let mut found = Vec::new();
        for (parent, child) in graph.default_edges() {
            let diff = stats.require(parent)?.size as i64 - stats.require(child)?.size as i64;
            if diff < self.min_diff {
                found.push((parent, child));
            }
        }
        Ok(found)
    }
}
