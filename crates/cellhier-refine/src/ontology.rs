//! Ontology construction: the initial term/gene DAG from community-detection tables.
//!
//! Terms below the size threshold are dropped together with every edge that
//! touches them, and terms left without any edge are dropped after them. Each gene is then attached to the most specific term that
//! holds it: leaves receive all of their genes, and a non-leaf term receives
//! the genes none of its children inherited.

use cellhier_core::errors::HierarchyError;
use cellhier_core::models::{EdgeKind, EdgeRow, TermRow};
use cellhier_core::types::collections::{FxHashMap, FxHashSet};

use crate::graph::dag_enforcement;
use crate::graph::HierarchyGraph;

/// The filtered terms and the combined default + gene edge table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OntologyTable {
    /// Terms that survived filtering, in input order.
    pub terms: Vec<TermRow>,
    /// Surviving `default` edges followed by the derived `gene` edges.
    pub edges: Vec<EdgeRow>,
}

#[derive(Debug, Clone)]
pub struct OntologyBuilder {
    min_term_size: usize,
}

impl OntologyBuilder {
    pub fn new(min_term_size: usize) -> Self {
        Self { min_term_size }
    }

    /// Build the base DAG. Fails with `HierarchyError::NotADag` if the
    /// surviving default edges contain a cycle.
    pub fn build(&self, terms: &[TermRow], edges: &[EdgeRow]) -> Result<HierarchyGraph, HierarchyError> {
        let table = self.create_ontology(terms, edges);
        let graph = graph_from_table(&table);
        dag_enforcement::ensure_acyclic(&graph)?;

        tracing::info!(
            terms = graph.term_count(),
            genes = graph.gene_count(),
            edges = graph.edge_count(),
            "ontology built"
        );
        Ok(graph)
    }

    /// Filter the input tables and derive the gene edges.
    pub fn create_ontology(&self, terms: &[TermRow], edges: &[EdgeRow]) -> OntologyTable {
        let terms = filter_terms(terms, self.min_term_size);
        let mut edges = {
            let names: FxHashSet<&str> = terms.iter().map(|t| t.name.as_str()).collect();
            filter_edges(edges, &names)
        };
        let terms = connected_terms(terms, &edges);

        tracing::debug!(
            terms = terms.len(),
            edges = edges.len(),
            min_term_size = self.min_term_size,
            "tables filtered by term size"
        );

        let leaves = leaf_terms(&terms, &edges);
        let mut gene_edges = leaf_gene_edges(&terms, &leaves);
        gene_edges.extend(nonleaf_gene_edges(&terms, &edges));
        edges.extend(gene_edges);

        OntologyTable { terms, edges }
    }
}

/// Keep terms with at least `min_term_size` genes, in input order.
///
/// Terms without genes and repeated term names are skipped with a warning.
pub fn filter_terms(terms: &[TermRow], min_term_size: usize) -> Vec<TermRow> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut kept = Vec::new();
    for term in terms {
        if term.genes.is_empty() {
            tracing::warn!(term = %term.name, "skipping term without genes");
            continue;
        }
        if !seen.insert(term.name.as_str()) {
            tracing::warn!(term = %term.name, "skipping duplicate term row");
            continue;
        }
        if term.size >= min_term_size {
            kept.push(term.clone());
        }
    }
    kept
}

/// Keep `default` edges whose endpoints both survived, dropping repeats.
pub fn filter_edges(edges: &[EdgeRow], names: &FxHashSet<&str>) -> Vec<EdgeRow> {
    let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();
    edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Default)
        .filter(|e| names.contains(e.parent.as_str()) && names.contains(e.child.as_str()))
        .filter(|e| seen.insert((e.parent.as_str(), e.child.as_str())))
        .cloned()
        .collect()
}

/// Drop terms that take part in no surviving edge. Such a term cannot be
/// placed in the hierarchy, and neither can the genes only it holds.
pub fn connected_terms(terms: Vec<TermRow>, edges: &[EdgeRow]) -> Vec<TermRow> {
    let linked: FxHashSet<&str> = edges
        .iter()
        .flat_map(|e| [e.parent.as_str(), e.child.as_str()])
        .collect();
    let before = terms.len();
    let kept: Vec<TermRow> = terms
        .into_iter()
        .filter(|t| linked.contains(t.name.as_str()))
        .collect();
    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), "dropped terms without edges");
    }
    kept
}

/// Terms that appear as a child but never as a parent.
pub fn leaf_terms<'a>(terms: &'a [TermRow], edges: &[EdgeRow]) -> FxHashSet<&'a str> {
    let parents: FxHashSet<&str> = edges.iter().map(|e| e.parent.as_str()).collect();
    let children: FxHashSet<&str> = edges.iter().map(|e| e.child.as_str()).collect();
    terms
        .iter()
        .map(|t| t.name.as_str())
        .filter(|name| children.contains(name) && !parents.contains(name))
        .collect()
}

/// One gene edge per member gene of every leaf term.
pub fn leaf_gene_edges(terms: &[TermRow], leaves: &FxHashSet<&str>) -> Vec<EdgeRow> {
    terms
        .iter()
        .filter(|t| leaves.contains(t.name.as_str()))
        .flat_map(|t| {
            unique(&t.genes)
                .into_iter()
                .map(move |g| EdgeRow::new(t.name.clone(), g, EdgeKind::Gene))
        })
        .collect()
}

/// Gene edges for the genes a parent holds that none of its children hold.
pub fn nonleaf_gene_edges(terms: &[TermRow], edges: &[EdgeRow]) -> Vec<EdgeRow> {
    let genes_of: FxHashMap<&str, &[String]> = terms
        .iter()
        .map(|t| (t.name.as_str(), t.genes.as_slice()))
        .collect();

    let mut children_of: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for edge in edges {
        children_of
            .entry(edge.parent.as_str())
            .or_default()
            .push(edge.child.as_str());
    }

    let mut rows = Vec::new();
    for term in terms {
        let Some(children) = children_of.get(term.name.as_str()) else {
            continue;
        };
        let inherited: FxHashSet<&str> = children
            .iter()
            .filter_map(|c| genes_of.get(c))
            .flat_map(|genes| genes.iter().map(String::as_str))
            .collect();
        for gene in unique(&term.genes) {
            if !inherited.contains(gene.as_str()) {
                rows.push(EdgeRow::new(term.name.clone(), gene, EdgeKind::Gene));
            }
        }
    }
    rows
}

/// Assemble the graph: terms in table order, then every edge row.
fn graph_from_table(table: &OntologyTable) -> HierarchyGraph {
    let mut graph = HierarchyGraph::new();
    for term in &table.terms {
        graph.ensure_term(&term.name);
    }
    for edge in &table.edges {
        let parent = graph.ensure_term(&edge.parent);
        let child = match edge.kind {
            EdgeKind::Default => graph.ensure_term(&edge.child),
            EdgeKind::Gene => graph.ensure_gene(&edge.child),
        };
        graph.connect(parent, child, edge.kind);
    }
    graph
}

fn unique(genes: &[String]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    genes
        .iter()
        .filter(|g| seen.insert(g.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str, genes: &str, stability: f64) -> TermRow {
        TermRow::new(name, genes.split(' ').map(str::to_string).collect(), stability)
    }

    #[test]
    fn leaf_terms_are_children_that_are_never_parents() {
        let terms = vec![
            term("root", "a b c", 1.0),
            term("child", "a b", 1.0),
            term("alone", "x y", 1.0),
        ];
        let edges = vec![EdgeRow::default_edge("root", "child")];
        let leaves = leaf_terms(&terms, &edges);
        assert!(leaves.contains("child"));
        assert!(!leaves.contains("alone"));
        assert!(!leaves.contains("root"));
    }

    #[test]
    fn connected_terms_drops_terms_without_edges() {
        let terms = vec![
            term("root", "a b c", 1.0),
            term("child", "a b", 1.0),
            term("alone", "x y", 1.0),
        ];
        let edges = vec![EdgeRow::default_edge("root", "child")];
        let kept: Vec<String> = connected_terms(terms, &edges)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(kept, vec!["root", "child"]);
    }

    #[test]
    fn nonleaf_gene_edges_attach_genes_lost_by_children() {
        let terms = vec![term("root", "a b c", 1.0), term("child", "a b", 1.0)];
        let edges = vec![EdgeRow::default_edge("root", "child")];
        let rows = nonleaf_gene_edges(&terms, &edges);
        assert_eq!(rows, vec![EdgeRow::new("root", "c", EdgeKind::Gene)]);
    }

    #[test]
    fn filter_edges_drops_edges_touching_removed_terms_and_duplicates() {
        let names: FxHashSet<&str> = ["a", "b"].into_iter().collect();
        let edges = vec![
            EdgeRow::default_edge("a", "b"),
            EdgeRow::default_edge("a", "b"),
            EdgeRow::default_edge("a", "c"),
            EdgeRow::new("a", "g", EdgeKind::Gene),
        ];
        assert_eq!(filter_edges(&edges, &names), vec![EdgeRow::default_edge("a", "b")]);
    }

    #[test]
    fn filter_terms_skips_empty_and_duplicate_terms() {
        let mut empty = term("empty", "x", 1.0);
        empty.genes.clear();
        let terms = vec![
            term("big", "a b c d", 1.0),
            empty,
            term("big", "a b c d e", 2.0),
            term("small", "a", 1.0),
        ];
        let kept = filter_terms(&terms, 2);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].stability, 1.0);
    }
}
