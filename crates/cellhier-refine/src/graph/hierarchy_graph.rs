//! petgraph::StableGraph wrapper with term/gene node keys and typed edges.

use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};

use cellhier_core::errors::HierarchyError;
use cellhier_core::models::EdgeKind;
use cellhier_core::types::collections::{FxHashMap, FxHashSet};

use super::dag_enforcement;

/// Identity of a node. Terms and genes live in separate key spaces, so a gene
/// id that happens to equal a term name never fuses the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Term(String),
    Gene(String),
}

impl NodeKey {
    pub fn name(&self) -> &str {
        match self {
            Self::Term(name) | Self::Gene(name) => name,
        }
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Self::Term(_))
    }

    pub fn is_gene(&self) -> bool {
        matches!(self, Self::Gene(_))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The underlying directed graph type.
pub type HierarchyStableGraph = StableGraph<NodeKey, EdgeKind, Directed>;

/// A term/gene hierarchy owned by one refinement run.
///
/// Nodes live in a `StableGraph` arena, so indices of surviving nodes stay
/// valid when terms are deleted.
#[derive(Debug, Clone, Default)]
pub struct HierarchyGraph {
    /// The petgraph stable graph.
    pub graph: HierarchyStableGraph,
    /// Map from node key → NodeIndex for O(1) lookup.
    node_index: FxHashMap<NodeKey, NodeIndex>,
}

impl HierarchyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for a term.
    pub fn ensure_term(&mut self, name: &str) -> NodeIndex {
        self.ensure_node(NodeKey::Term(name.to_string()))
    }

    /// Get or create the node for a gene.
    pub fn ensure_gene(&mut self, name: &str) -> NodeIndex {
        self.ensure_node(NodeKey::Gene(name.to_string()))
    }

    fn ensure_node(&mut self, key: NodeKey) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.node_index.insert(key, idx);
        idx
    }

    pub fn term(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(&NodeKey::Term(name.to_string())).copied()
    }

    pub fn gene(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(&NodeKey::Gene(name.to_string())).copied()
    }

    pub fn key(&self, idx: NodeIndex) -> Option<&NodeKey> {
        self.graph.node_weight(idx)
    }

    /// Name of a live node, or an empty string for a removed one.
    pub fn name(&self, idx: NodeIndex) -> &str {
        self.key(idx).map(NodeKey::name).unwrap_or_default()
    }

    pub fn is_term(&self, idx: NodeIndex) -> bool {
        self.key(idx).is_some_and(NodeKey::is_term)
    }

    pub fn is_gene(&self, idx: NodeIndex) -> bool {
        self.key(idx).is_some_and(NodeKey::is_gene)
    }

    /// Term nodes in index order, which is the order they were first added.
    pub fn term_indices(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.is_term(idx))
            .collect()
    }

    /// All `default` edges as (parent, child) pairs, in edge-index order.
    pub fn default_edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.graph
            .edge_references()
            .filter(|e| *e.weight() == EdgeKind::Default)
            .map(|e| (e.source(), e.target()))
            .collect()
    }

    pub fn has_edge(&self, parent: NodeIndex, child: NodeIndex) -> bool {
        self.graph.find_edge(parent, child).is_some()
    }

    pub fn edge_kind(&self, parent: NodeIndex, child: NodeIndex) -> Option<EdgeKind> {
        self.graph
            .find_edge(parent, child)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Add an edge with DAG enforcement.
    ///
    /// Returns `Ok(false)` if the edge already exists, and
    /// `HierarchyError::CycleDetected` if it would close a cycle.
    pub fn add_edge(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        kind: EdgeKind,
    ) -> Result<bool, HierarchyError> {
        if self.has_edge(parent, child) {
            return Ok(false);
        }
        if dag_enforcement::would_create_cycle(self, parent, child) {
            return Err(HierarchyError::CycleDetected {
                parent: self.name(parent).to_string(),
                child: self.name(child).to_string(),
            });
        }
        self.graph.add_edge(parent, child, kind);
        Ok(true)
    }

    /// Add an edge without cycle checks. Used while loading an input whose
    /// acyclicity is verified as a whole afterwards.
    pub(crate) fn connect(&mut self, parent: NodeIndex, child: NodeIndex, kind: EdgeKind) -> bool {
        if self.has_edge(parent, child) {
            return false;
        }
        self.graph.add_edge(parent, child, kind);
        true
    }

    pub fn remove_edge(&mut self, parent: NodeIndex, child: NodeIndex) -> Option<EdgeKind> {
        let edge = self.graph.find_edge(parent, child)?;
        self.graph.remove_edge(edge)
    }

    /// Remove a term and all its edges. Genes are never removed.
    pub fn remove_term(&mut self, idx: NodeIndex) -> bool {
        match self.graph.node_weight(idx) {
            Some(key @ NodeKey::Term(_)) => {
                let key = key.clone();
                self.node_index.remove(&key);
                self.graph.remove_node(idx);
                true
            }
            _ => false,
        }
    }

    /// Direct parents of a node.
    pub fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect()
    }

    /// Direct children of a node with the type of the connecting edge.
    pub fn children(&self, idx: NodeIndex) -> Vec<(NodeIndex, EdgeKind)> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()))
            .collect()
    }

    /// Terms without any incoming edge, in index order.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.term_indices()
            .into_iter()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// Genes reachable from any term.
    pub fn reachable_genes(&self) -> FxHashSet<NodeIndex> {
        let mut genes = FxHashSet::default();
        for root in self.roots() {
            let mut dfs = petgraph::visit::Dfs::new(&self.graph, root);
            while let Some(node) = dfs.next(&self.graph) {
                if self.is_gene(node) {
                    genes.insert(node);
                }
            }
        }
        genes
    }

    pub fn term_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&idx| self.is_term(idx))
            .count()
    }

    pub fn gene_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&idx| self.is_gene(idx))
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn default_edge_count(&self) -> usize {
        self.graph
            .edge_indices()
            .filter(|&e| self.graph.edge_weight(e) == Some(&EdgeKind::Default))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
