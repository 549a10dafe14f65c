//! Serialization of a refined graph back into node/edge tables.

use serde::{Deserialize, Serialize};

use cellhier_core::errors::{HierarchyError, TableError};
use cellhier_core::models::{EdgeRow, TermRow};
use cellhier_core::types::collections::FxHashMap;
use cellhier_tables::cdaps::{encode_community_detection, CommunityDetectionResult};

use crate::graph::{HierarchyGraph, HierarchyStats};

/// The refined hierarchy in table form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefinedHierarchy {
    /// Terms sorted by size, largest first.
    pub nodes: Vec<TermRow>,
    /// `default` edges, ordered by the position of parent then child in `nodes`.
    pub edges: Vec<EdgeRow>,
    /// Terms without a parent, in `nodes` order.
    pub roots: Vec<String>,
}

impl RefinedHierarchy {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Encode as a CDAPS community-detection result.
    pub fn to_community_detection(&self) -> Result<CommunityDetectionResult, TableError> {
        encode_community_detection(&self.nodes, &self.edges)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyExporter;

impl HierarchyExporter {
    /// Re-derive term statistics from `graph` and emit the tables.
    ///
    /// Stability scores are looked up by term name in `original`, the node
    /// table as read before any filtering.
    pub fn export(
        &self,
        graph: &HierarchyGraph,
        original: &[TermRow],
    ) -> Result<RefinedHierarchy, HierarchyError> {
        let stats = HierarchyStats::compute(graph);
        stats.verify(graph)?;

        let mut stability: FxHashMap<&str, f64> = FxHashMap::default();
        for row in original {
            stability.entry(row.name.as_str()).or_insert(row.stability);
        }

        let ordered = stats.by_size_desc();
        let mut position = FxHashMap::default();
        let mut nodes = Vec::with_capacity(ordered.len());
        for (i, term) in ordered.iter().enumerate() {
            let score = stability.get(term.name.as_str()).copied().ok_or_else(|| {
                HierarchyError::GraphInconsistency {
                    details: format!("term {} missing from the input node table", term.name),
                }
            })?;
            let mut genes: Vec<String> = term
                .genes
                .iter()
                .map(|&g| graph.name(g).to_string())
                .collect();
            genes.sort();

            position.insert(term.node, i);
            nodes.push(TermRow {
                name: term.name.clone(),
                size: term.size,
                genes,
                stability: score,
            });
        }

        let mut ranked: Vec<(usize, usize, EdgeRow)> = graph
            .default_edges()
            .into_iter()
            .filter_map(|(p, c)| {
                let rank = (*position.get(&p)?, *position.get(&c)?);
                Some((rank.0, rank.1, EdgeRow::default_edge(graph.name(p), graph.name(c))))
            })
            .collect();
        ranked.sort_by_key(|&(p, c, _)| (p, c));
        let edges: Vec<EdgeRow> = ranked.into_iter().map(|(_, _, e)| e).collect();

        let mut roots: Vec<(usize, String)> = graph
            .roots()
            .into_iter()
            .filter_map(|r| Some((*position.get(&r)?, graph.name(r).to_string())))
            .collect();
        roots.sort();
        let roots = roots.into_iter().map(|(_, name)| name).collect();

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "hierarchy exported"
        );
        Ok(RefinedHierarchy {
            nodes,
            edges,
            roots,
        })
    }
}
