use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Edge type tag: `default` edges link two terms, `gene` edges link a term to a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Default,
    Gene,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Gene => "gene",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "gene" => Ok(Self::Gene),
            other => Err(other.to_string()),
        }
    }
}

/// One row of an edges table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub parent: String,
    pub child: String,
    pub kind: EdgeKind,
}

impl EdgeRow {
    pub fn new(parent: impl Into<String>, child: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            kind,
        }
    }

    /// Shorthand for a term → term edge.
    pub fn default_edge(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(parent, child, EdgeKind::Default)
    }
}
