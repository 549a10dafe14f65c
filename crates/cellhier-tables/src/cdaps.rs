//! CDAPS community-detection result encoding.
//!
//! Terms receive synthetic integer node ids placed after the largest gene node
//! id. Membership is encoded as `term,gene,c-m;` and containment as
//! `parent,child,c-c;` triples in a single string, with the stability of each
//! term published as the `HiDeF_persistence` node attribute.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use cellhier_core::errors::TableError;
use cellhier_core::models::{EdgeKind, EdgeRow, TermRow};
use cellhier_core::types::collections::{BTreeMap, FxHashMap};

/// Node attribute name carrying the stability score.
pub const PERSISTENCE_ATTRIBUTE: &str = "HiDeF_persistence";

const PERSISTENCE_ALIAS: &str = "p1";

/// A community-detection result as consumed by the hierarchy-to-network converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityDetectionResult {
    /// `c-m` and `c-c` triples, each terminated by `;`.
    #[serde(rename = "communityDetectionResult")]
    pub result: String,
    /// Synthetic term node id → stability, ordered by id.
    #[serde(skip)]
    pub persistence: BTreeMap<u64, f64>,
    #[serde(rename = "nodeAttributesAsCX2")]
    pub node_attributes: Value,
}

/// Largest integer member id across all node rows, 0 for an empty table.
pub fn max_member_id(nodes: &[TermRow]) -> Result<u64, TableError> {
    let mut max = 0;
    for row in nodes {
        for member in &row.genes {
            max = max.max(parse_member(&row.name, member)?);
        }
    }
    Ok(max)
}

/// Assign `name` a synthetic id if it has none yet.
///
/// Returns the (possibly advanced) running maximum and the id of `name`.
pub fn update_cluster_node_map(
    cluster_ids: &mut FxHashMap<String, u64>,
    name: &str,
    max_node: u64,
) -> (u64, u64) {
    if let Some(&id) = cluster_ids.get(name) {
        return (max_node, id);
    }
    let id = max_node + 1;
    cluster_ids.insert(name.to_string(), id);
    (id, id)
}

/// Record `stability` for `node_id` unless one is already present.
pub fn update_persistence_map(persistence: &mut BTreeMap<u64, f64>, node_id: u64, stability: f64) {
    persistence.entry(node_id).or_insert(stability);
}

/// Append the `c-m` triples of one term to `out`.
pub fn write_members_for_row(out: &mut String, row: &TermRow, node_id: u64) {
    for member in &row.genes {
        let _ = write!(out, "{node_id},{member},c-m;");
    }
}

/// Encode a refined hierarchy as a community-detection result.
///
/// Only `default` edge rows are encoded; gene membership comes from the node rows.
pub fn encode_community_detection(
    nodes: &[TermRow],
    edges: &[EdgeRow],
) -> Result<CommunityDetectionResult, TableError> {
    let mut max_node = max_member_id(nodes)?;
    let mut cluster_ids: FxHashMap<String, u64> = FxHashMap::default();
    let mut persistence = BTreeMap::new();
    let mut result = String::new();

    for row in nodes {
        let (next_max, node_id) = update_cluster_node_map(&mut cluster_ids, &row.name, max_node);
        max_node = next_max;
        update_persistence_map(&mut persistence, node_id, row.stability);
        write_members_for_row(&mut result, row, node_id);
    }

    for edge in edges.iter().filter(|e| e.kind == EdgeKind::Default) {
        let parent = cluster_id(&cluster_ids, &edge.parent)?;
        let child = cluster_id(&cluster_ids, &edge.child)?;
        let _ = write!(result, "{parent},{child},c-c;");
    }

    tracing::debug!(
        terms = cluster_ids.len(),
        bytes = result.len(),
        "encoded community detection result"
    );

    let node_attributes = persistence_attributes(&persistence);
    Ok(CommunityDetectionResult {
        result,
        persistence,
        node_attributes,
    })
}

fn cluster_id(cluster_ids: &FxHashMap<String, u64>, name: &str) -> Result<u64, TableError> {
    cluster_ids
        .get(name)
        .copied()
        .ok_or_else(|| TableError::UnknownMemberId {
            term: name.to_string(),
            member: name.to_string(),
        })
}

fn persistence_attributes(persistence: &BTreeMap<u64, f64>) -> Value {
    let integral = persistence.values().all(|v| v.fract() == 0.0);
    let data_type = if integral { "integer" } else { "double" };
    let nodes: Vec<Value> = persistence
        .iter()
        .map(|(&id, &value)| {
            let v = if integral {
                json!(value as i64)
            } else {
                json!(value)
            };
            json!({ "id": id, "v": { PERSISTENCE_ALIAS: v } })
        })
        .collect();

    json!({
        "attributeDeclarations": [{
            "nodes": {
                PERSISTENCE_ATTRIBUTE: { "d": data_type, "a": PERSISTENCE_ALIAS, "v": 0 }
            }
        }],
        "nodes": nodes,
    })
}

fn parse_member(term: &str, member: &str) -> Result<u64, TableError> {
    member
        .parse::<u64>()
        .map_err(|_| TableError::NonNumericMember {
            term: term.to_string(),
            member: member.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, genes: &[&str], stability: f64) -> TermRow {
        TermRow::new(name, genes.iter().map(|g| g.to_string()).collect(), stability)
    }

    #[test]
    fn max_member_id_spans_all_rows() {
        let nodes = vec![
            row("Cluster3-2", &["51", "52", "57", "61", "77"], 11.0),
            row("Cluster2-9", &["0", "1", "19", "48"], 55.0),
            row("Cluster1-0", &["17", "26", "27", "64"], 11.0),
        ];
        assert_eq!(max_member_id(&nodes).unwrap(), 77);
        assert_eq!(max_member_id(&[]).unwrap(), 0);
    }

    #[test]
    fn max_member_id_rejects_non_numeric_members() {
        let nodes = vec![row("Cluster1-0", &["17", "TP53"], 1.0)];
        assert!(matches!(
            max_member_id(&nodes),
            Err(TableError::NonNumericMember { .. })
        ));
    }

    #[test]
    fn write_members_for_row_emits_cm_triples() {
        let mut out = String::new();
        write_members_for_row(&mut out, &row("c", &["0", "1", "19", "48"], 0.0), 5);
        assert_eq!(out, "5,0,c-m;5,1,c-m;5,19,c-m;5,48,c-m;");
    }

    #[test]
    fn update_cluster_node_map_assigns_once() {
        let mut map = FxHashMap::default();
        assert_eq!(update_cluster_node_map(&mut map, "Cluster-0-0", 4), (5, 5));
        assert_eq!(update_cluster_node_map(&mut map, "Cluster-0-0", 4), (4, 5));
        assert_eq!(map.get("Cluster-0-0"), Some(&5));
    }

    #[test]
    fn update_persistence_map_keeps_first_value() {
        let mut map = BTreeMap::new();
        update_persistence_map(&mut map, 1, 3.0);
        update_persistence_map(&mut map, 1, 9.0);
        update_persistence_map(&mut map, 2, 4.0);
        assert_eq!(map.get(&1), Some(&3.0));
        assert_eq!(map.len(), 2);
    }
}
