//! Transitive reduction over `default` edges.

use petgraph::stable_graph::NodeIndex;

use cellhier_core::models::EdgeKind;
use cellhier_core::types::collections::FxHashSet;

use crate::graph::HierarchyGraph;

/// Removes every `default` edge that is implied by a longer path.
///
/// Gene edges are never touched, so no gene set changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutRemover;

impl ShortcutRemover {
    /// Returns the number of edges removed.
    pub fn run(&self, graph: &mut HierarchyGraph) -> usize {
        let mut removed = 0;
        for (parent, child) in graph.default_edges() {
            if has_alternative_path(graph, parent, child) {
                graph.remove_edge(parent, child);
                removed += 1;
                tracing::debug!(
                    parent = graph.name(parent),
                    child = graph.name(child),
                    "shortcut edge removed"
                );
            }
        }
        removed
    }
}

/// Whether `child` is reachable from `parent` without the direct edge.
pub fn has_alternative_path(graph: &HierarchyGraph, parent: NodeIndex, child: NodeIndex) -> bool {
    let mut stack: Vec<NodeIndex> = term_children(graph, parent)
        .filter(|&c| c != child)
        .collect();
    let mut visited: FxHashSet<NodeIndex> = stack.iter().copied().collect();

    while let Some(node) = stack.pop() {
        if node == child {
            return true;
        }
        for next in term_children(graph, node) {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }
    false
}

fn term_children(graph: &HierarchyGraph, node: NodeIndex) -> impl Iterator<Item = NodeIndex> {
    graph
        .children(node)
        .into_iter()
        .filter(|&(_, kind)| kind == EdgeKind::Default)
        .map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_direct_edge_implied_by_longer_path() {
        let mut g = HierarchyGraph::new();
        let a = g.ensure_term("a");
        let b = g.ensure_term("b");
        let c = g.ensure_term("c");
        g.add_edge(a, b, EdgeKind::Default).unwrap();
        g.add_edge(b, c, EdgeKind::Default).unwrap();
        g.add_edge(a, c, EdgeKind::Default).unwrap();

        assert_eq!(ShortcutRemover.run(&mut g), 1);
        assert!(!g.has_edge(a, c));
        assert!(g.has_edge(a, b));
        assert!(g.has_edge(b, c));
        assert_eq!(ShortcutRemover.run(&mut g), 0);
    }

    #[test]
    fn gene_edges_are_kept_even_when_redundant() {
        let mut g = HierarchyGraph::new();
        let a = g.ensure_term("a");
        let b = g.ensure_term("b");
        let x = g.ensure_gene("x");
        g.add_edge(a, b, EdgeKind::Default).unwrap();
        g.add_edge(b, x, EdgeKind::Gene).unwrap();
        g.add_edge(a, x, EdgeKind::Gene).unwrap();

        assert_eq!(ShortcutRemover.run(&mut g), 0);
        assert!(g.has_edge(a, x));
    }
}
