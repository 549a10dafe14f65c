use serde::{Deserialize, Serialize};

/// One row of a nodes table: a term with its member genes and stability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRow {
    /// Term identifier, e.g. `Cluster3-12`.
    pub name: String,
    /// Number of member genes as reported by the producer of the table.
    pub size: usize,
    /// Member gene identifiers, in table order.
    pub genes: Vec<String>,
    /// Stability/persistence score. Carried through refinement unchanged.
    pub stability: f64,
}

impl TermRow {
    pub fn new(name: impl Into<String>, genes: Vec<String>, stability: f64) -> Self {
        Self {
            name: name.into(),
            size: genes.len(),
            genes,
            stability,
        }
    }

    /// Space-joined member list as written to the nodes table.
    pub fn gene_list(&self) -> String {
        self.genes.join(" ")
    }
}
