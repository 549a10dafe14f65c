//! Delete a term and hand its children to every one of its parents.

use petgraph::stable_graph::NodeIndex;

use cellhier_core::errors::HierarchyError;

use super::hierarchy_graph::HierarchyGraph;

/// Remove `term`, re-attaching each of its children (terms and genes, with
/// their original edge type) to each of its parents.
///
/// Returns the number of parent → grandchild edges that did not already exist.
/// A term with several parents fans all of its children out to all of them;
/// the shortcut pass trims whatever that makes redundant.
pub fn collapse_into_parents(
    graph: &mut HierarchyGraph,
    term: NodeIndex,
) -> Result<usize, HierarchyError> {
    if !graph.is_term(term) {
        return Err(HierarchyError::UnknownNode {
            name: format!("#{}", term.index()),
        });
    }

    let parents = graph.parents(term);
    let children = graph.children(term);

    for &parent in &parents {
        graph.remove_edge(parent, term);
    }

    let mut added = 0;
    for (child, kind) in children {
        graph.remove_edge(term, child);
        for &parent in &parents {
            if graph.add_edge(parent, child, kind)? {
                added += 1;
            }
        }
    }

    graph.remove_term(term);
    Ok(added)
}
