//! Cycle detection for the hierarchy graph.
//! Single edges are checked by reachability before insertion; whole graphs by
//! Tarjan's SCC.

use std::collections::VecDeque;

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::Dfs;

use cellhier_core::errors::HierarchyError;
use cellhier_core::types::collections::{FxHashMap, FxHashSet};

use super::hierarchy_graph::HierarchyGraph;

/// Check whether adding an edge from `parent` to `child` would create a cycle.
pub fn would_create_cycle(graph: &HierarchyGraph, parent: NodeIndex, child: NodeIndex) -> bool {
    // Self-loops are always cycles.
    if parent == child {
        return true;
    }
    has_path(graph, child, parent)
}

/// DFS-based reachability check: can we reach `to` from `from`?
pub fn has_path(graph: &HierarchyGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let mut dfs = Dfs::new(&graph.graph, from);
    while let Some(node) = dfs.next(&graph.graph) {
        if node == to {
            return true;
        }
    }
    false
}

/// All strongly connected components that form cycles, self-loops included.
pub fn find_cycles(graph: &HierarchyGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.has_edge(scc[0], scc[0]))
        .collect()
}

/// Fail with `HierarchyError::NotADag` if the graph contains a cycle.
pub fn ensure_acyclic(graph: &HierarchyGraph) -> Result<(), HierarchyError> {
    if !is_cyclic_directed(&graph.graph) {
        return Ok(());
    }
    let cycle = find_cycles(graph)
        .first()
        .map(|scc| render_cycle(graph, scc))
        .unwrap_or_default();
    Err(HierarchyError::NotADag { cycle })
}

/// Render one concrete cycle through the component as `A -> B -> A`.
fn render_cycle(graph: &HierarchyGraph, scc: &[NodeIndex]) -> String {
    let start = scc[0];
    let members: FxHashSet<NodeIndex> = scc.iter().copied().collect();
    let mut prev: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for next in graph.graph.neighbors(node) {
            if next == start {
                let mut path = vec![node];
                let mut current = node;
                while current != start {
                    match prev.get(&current) {
                        Some(&p) => {
                            path.push(p);
                            current = p;
                        }
                        None => break,
                    }
                }
                path.reverse();
                path.push(start);
                return path
                    .iter()
                    .map(|&idx| graph.name(idx))
                    .collect::<Vec<_>>()
                    .join(" -> ");
            }
            if members.contains(&next) && next != start && !prev.contains_key(&next) {
                prev.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    String::new()
}
