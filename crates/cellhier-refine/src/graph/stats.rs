//! Per-term statistics derived from the current graph state.
//!
//! Every pass recomputes these from scratch instead of updating them
//! incrementally; hierarchies hold hundreds of terms, not millions.

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::Dfs;

use cellhier_core::errors::HierarchyError;
use cellhier_core::types::collections::{FxHashMap, FxHashSet};

use super::hierarchy_graph::HierarchyGraph;

/// Size, gene set, and descendant terms of one term.
#[derive(Debug, Clone)]
pub struct TermStats {
    pub node: NodeIndex,
    pub name: String,
    /// Number of genes reachable from the term.
    pub size: usize,
    /// Gene nodes reachable from the term.
    pub genes: FxHashSet<NodeIndex>,
    /// Term nodes reachable from the term, excluding itself.
    pub descendant_terms: FxHashSet<NodeIndex>,
}

/// Statistics for every live term, in term-index order.
#[derive(Debug, Clone, Default)]
pub struct HierarchyStats {
    pub terms: Vec<TermStats>,
    position: FxHashMap<NodeIndex, usize>,
}

impl HierarchyStats {
    pub fn compute(graph: &HierarchyGraph) -> Self {
        let mut terms = Vec::new();
        let mut position = FxHashMap::default();

        for node in graph.term_indices() {
            let mut genes = FxHashSet::default();
            let mut descendant_terms = FxHashSet::default();
            let mut dfs = Dfs::new(&graph.graph, node);
            while let Some(next) = dfs.next(&graph.graph) {
                if next == node {
                    continue;
                }
                if graph.is_gene(next) {
                    genes.insert(next);
                } else {
                    descendant_terms.insert(next);
                }
            }
            position.insert(node, terms.len());
            terms.push(TermStats {
                node,
                name: graph.name(node).to_string(),
                size: genes.len(),
                genes,
                descendant_terms,
            });
        }

        Self { terms, position }
    }

    pub fn get(&self, node: NodeIndex) -> Option<&TermStats> {
        self.position.get(&node).map(|&i| &self.terms[i])
    }

    /// Stats of a term that must exist.
    pub fn require(&self, node: NodeIndex) -> Result<&TermStats, HierarchyError> {
        self.get(node).ok_or_else(|| HierarchyError::GraphInconsistency {
            details: format!("no statistics for node {}", node.index()),
        })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term stats ordered by size, largest first. Ties keep term-index order.
    pub fn by_size_desc(&self) -> Vec<&TermStats> {
        let mut ordered: Vec<&TermStats> = self.terms.iter().collect();
        ordered.sort_by(|a, b| b.size.cmp(&a.size));
        ordered
    }

    /// Check these statistics against the current graph.
    ///
    /// Every live term must have an entry, and its gene set must equal its
    /// direct gene children plus the gene sets of its direct term children.
    /// Every gene node must have at least one parent term. Stale statistics
    /// or a pass that dropped a gene edge fail here with
    /// `HierarchyError::GraphInconsistency`.
    pub fn verify(&self, graph: &HierarchyGraph) -> Result<(), HierarchyError> {
        for node in graph.term_indices() {
            let term = self.require(node)?;
            let mut expected: FxHashSet<NodeIndex> = FxHashSet::default();
            for (child, _) in graph.children(node) {
                if graph.is_gene(child) {
                    expected.insert(child);
                } else {
                    expected.extend(self.require(child)?.genes.iter().copied());
                }
            }
            if expected != term.genes {
                return Err(HierarchyError::GraphInconsistency {
                    details: format!(
                        "term {} has {} genes but its children hold {}",
                        term.name,
                        term.genes.len(),
                        expected.len()
                    ),
                });
            }
        }
        if self.terms.len() != graph.term_count() {
            return Err(HierarchyError::GraphInconsistency {
                details: format!(
                    "statistics cover {} terms, graph has {}",
                    self.terms.len(),
                    graph.term_count()
                ),
            });
        }

        let orphan = graph
            .graph
            .node_indices()
            .find(|&idx| graph.is_gene(idx) && graph.parents(idx).is_empty());
        if let Some(gene) = orphan {
            return Err(HierarchyError::GraphInconsistency {
                details: format!("gene {} has no parent term", graph.name(gene)),
            });
        }
        Ok(())
    }
}

/// Fraction of `smaller`'s genes that also belong to `larger`.
/// Zero when `smaller` is empty.
pub fn containment_index(larger: &FxHashSet<NodeIndex>, smaller: &FxHashSet<NodeIndex>) -> f64 {
    if smaller.is_empty() {
        return 0.0;
    }
    let shared = smaller.iter().filter(|g| larger.contains(g)).count();
    shared as f64 / smaller.len() as f64
}

/// Intersection over union. Zero when both sets are empty.
pub fn jaccard(a: &FxHashSet<NodeIndex>, b: &FxHashSet<NodeIndex>) -> f64 {
    let shared = a.iter().filter(|g| b.contains(g)).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}
