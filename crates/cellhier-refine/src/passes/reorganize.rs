//! Containment reorganization: add the ancestry edges the clustering missed.
//!
//! A smaller term whose genes lie mostly inside a larger term, by containment
//! index, becomes a child of that term unless it already descends from it.
//! Edges only ever run from a strictly larger term to a strictly smaller one
//! (sizes recomputed every sweep), which keeps the graph acyclic.

use cellhier_core::errors::HierarchyError;
use cellhier_core::models::EdgeKind;

use crate::graph::{containment_index, HierarchyGraph, HierarchyStats};

use super::ShortcutRemover;

/// What a reorganization run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorganizeOutcome {
    /// Whether any sweep added an edge.
    pub modified: bool,
    pub edges_added: usize,
    /// Number of sweeps, including the final one that added nothing.
    pub sweeps: usize,
    pub shortcuts_removed: usize,
}

#[derive(Debug, Clone)]
pub struct ContainmentReorganizer {
    threshold: f64,
}

impl ContainmentReorganizer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Sweep until no edge is added, removing shortcuts after each sweep.
    pub fn run(&self, graph: &mut HierarchyGraph) -> Result<ReorganizeOutcome, HierarchyError> {
        let mut outcome = ReorganizeOutcome::default();
        loop {
            outcome.sweeps += 1;
            let added = self.sweep(graph)?;
            outcome.edges_added += added;
            outcome.shortcuts_removed += ShortcutRemover.run(graph);
            tracing::debug!(sweep = outcome.sweeps, added, "containment sweep finished");
            if added == 0 {
                break;
            }
        }
        outcome.modified = outcome.edges_added > 0;
        Ok(outcome)
    }

    /// One pass over all term pairs, largest term first.
    fn sweep(&self, graph: &mut HierarchyGraph) -> Result<usize, HierarchyError> {
        let stats = HierarchyStats::compute(graph);
        let ordered = stats.by_size_desc();
        let mut added = 0;

        for comp in &ordered {
            let mut covered = comp.descendant_terms.clone();
            for cand in ordered.iter().filter(|c| c.size < comp.size) {
                if covered.contains(&cand.node) {
                    continue;
                }
                if containment_index(&comp.genes, &cand.genes) >= self.threshold {
                    graph.add_edge(comp.node, cand.node, EdgeKind::Default)?;
                    added += 1;
                    covered.insert(cand.node);
                    covered.extend(cand.descendant_terms.iter().copied());
                    tracing::debug!(
                        parent = %comp.name,
                        child = %cand.name,
                        "containment above threshold, edge added"
                    );
                }
            }
        }
        Ok(added)
    }
}
