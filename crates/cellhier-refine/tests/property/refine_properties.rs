//! Property tests: structural invariants of every refinement pass on random
//! layered hierarchies.

use std::collections::BTreeSet;

use proptest::prelude::*;

use cellhier_core::config::RefinerConfig;
use cellhier_core::models::{EdgeRow, TermRow};
use cellhier_refine::graph::{containment_index, dag_enforcement, jaccard};
use cellhier_refine::{
    ContainmentReorganizer, HierarchyGraph, HierarchyRefiner, HierarchyStats, OntologyBuilder,
    ParentChildMerger, RedundancyCollapser, ShortcutRemover,
};

const CONTAINMENT: f64 = 0.75;
const JACCARD: f64 = 0.9;
const MIN_DIFF: i64 = 1;

/// Terms `t0..tn` with random gene sets and random edges `ti -> tj` for `i < j`,
/// so the input is always acyclic.
fn hierarchy_strategy() -> impl Strategy<Value = (Vec<TermRow>, Vec<EdgeRow>)> {
    (2usize..9)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(prop::collection::btree_set(0u32..20, 1..9), n),
                prop::collection::vec(any::<bool>(), n * (n - 1) / 2),
            )
        })
        .prop_map(|(gene_sets, mask)| {
            let terms: Vec<TermRow> = gene_sets
                .iter()
                .enumerate()
                .map(|(i, genes)| {
                    TermRow::new(
                        format!("t{i}"),
                        genes.iter().map(|g| format!("g{g}")).collect(),
                        i as f64,
                    )
                })
                .collect();
            let mut edges = Vec::new();
            let mut bits = mask.into_iter();
            for i in 0..terms.len() {
                for j in (i + 1)..terms.len() {
                    if bits.next().unwrap_or(false) {
                        edges.push(EdgeRow::default_edge(format!("t{i}"), format!("t{j}")));
                    }
                }
            }
            (terms, edges)
        })
}

fn base_graph(terms: &[TermRow], edges: &[EdgeRow]) -> HierarchyGraph {
    OntologyBuilder::new(1).build(terms, edges).unwrap()
}

fn assert_acyclic(graph: &HierarchyGraph) -> Result<(), TestCaseError> {
    let cycles = dag_enforcement::find_cycles(graph);
    prop_assert!(cycles.is_empty(), "found {} cycles", cycles.len());
    Ok(())
}

proptest! {
    #[test]
    fn passes_keep_the_graph_acyclic((terms, edges) in hierarchy_strategy()) {
        let mut g = base_graph(&terms, &edges);
        assert_acyclic(&g)?;

        ContainmentReorganizer::new(CONTAINMENT).run(&mut g).unwrap();
        assert_acyclic(&g)?;
        ParentChildMerger::new(JACCARD).run(&mut g).unwrap();
        assert_acyclic(&g)?;
        RedundancyCollapser::new(MIN_DIFF).run(&mut g).unwrap();
        assert_acyclic(&g)?;
        ShortcutRemover.run(&mut g);
        assert_acyclic(&g)?;
    }

    #[test]
    fn passes_never_lose_a_gene((terms, edges) in hierarchy_strategy()) {
        let mut g = base_graph(&terms, &edges);
        let genes = g.reachable_genes();

        ContainmentReorganizer::new(CONTAINMENT).run(&mut g).unwrap();
        prop_assert_eq!(&g.reachable_genes(), &genes);
        ParentChildMerger::new(JACCARD).run(&mut g).unwrap();
        prop_assert_eq!(&g.reachable_genes(), &genes);
        RedundancyCollapser::new(MIN_DIFF).run(&mut g).unwrap();
        prop_assert_eq!(&g.reachable_genes(), &genes);
    }

    #[test]
    fn reorganized_terms_are_below_containment_threshold(
        (terms, edges) in hierarchy_strategy()
    ) {
        let mut g = base_graph(&terms, &edges);
        ContainmentReorganizer::new(CONTAINMENT).run(&mut g).unwrap();

        let stats = HierarchyStats::compute(&g);
        for larger in &stats.terms {
            for smaller in stats.terms.iter().filter(|t| t.size < larger.size) {
                if larger.descendant_terms.contains(&smaller.node) {
                    continue;
                }
                let ci = containment_index(&larger.genes, &smaller.genes);
                prop_assert!(
                    ci < CONTAINMENT,
                    "{} -> {} missing with CI {}", larger.name, smaller.name, ci
                );
            }
        }
    }

    #[test]
    fn merged_edges_are_below_jaccard_threshold((terms, edges) in hierarchy_strategy()) {
        let mut g = base_graph(&terms, &edges);
        ParentChildMerger::new(JACCARD).run(&mut g).unwrap();

        let stats = HierarchyStats::compute(&g);
        for (p, c) in g.default_edges() {
            let ji = jaccard(&stats.get(p).unwrap().genes, &stats.get(c).unwrap().genes);
            prop_assert!(ji < JACCARD);
        }
    }

    #[test]
    fn collapsed_edges_respect_min_diff((terms, edges) in hierarchy_strategy()) {
        let mut g = base_graph(&terms, &edges);
        RedundancyCollapser::new(MIN_DIFF).run(&mut g).unwrap();

        let stats = HierarchyStats::compute(&g);
        for (p, c) in g.default_edges() {
            let diff = stats.get(p).unwrap().size as i64 - stats.get(c).unwrap().size as i64;
            prop_assert!(diff >= MIN_DIFF);
        }
    }

    #[test]
    fn shortcut_removal_is_idempotent((terms, edges) in hierarchy_strategy()) {
        let mut g = base_graph(&terms, &edges);
        ShortcutRemover.run(&mut g);
        prop_assert_eq!(ShortcutRemover.run(&mut g), 0);
    }

    #[test]
    fn refined_output_satisfies_all_edge_invariants((terms, edges) in hierarchy_strategy()) {
        let config = RefinerConfig {
            containment_threshold: CONTAINMENT,
            jaccard_threshold: JACCARD,
            min_term_size: 1,
            min_diff: MIN_DIFF,
        };
        let outcome = HierarchyRefiner::new(config).unwrap().refine(&terms, &edges).unwrap();
        let h = &outcome.hierarchy;

        for pair in h.nodes.windows(2) {
            prop_assert!(pair[0].size >= pair[1].size);
        }
        let genes_of = |name: &str| -> BTreeSet<&str> {
            h.nodes
                .iter()
                .find(|n| n.name == name)
                .map(|n| n.genes.iter().map(String::as_str).collect())
                .unwrap_or_default()
        };
        for edge in &h.edges {
            let parent = genes_of(&edge.parent);
            let child = genes_of(&edge.child);
            prop_assert!(child.is_subset(&parent));
            let union = parent.union(&child).count() as f64;
            let inter = parent.intersection(&child).count() as f64;
            prop_assert!(inter / union < JACCARD);
            prop_assert!(parent.len() as i64 - child.len() as i64 >= MIN_DIFF);
        }
        for node in &h.nodes {
            let input = terms.iter().find(|t| t.name == node.name).unwrap();
            prop_assert_eq!(node.stability, input.stability);
        }
    }
}
