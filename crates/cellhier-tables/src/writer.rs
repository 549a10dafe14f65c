//! Tab-separated node/edge table output, in the same format the reader accepts.

use std::path::Path;

use cellhier_core::errors::TableError;
use cellhier_core::models::{EdgeRow, TermRow};

/// Render node rows as header-less TSV, one row per line.
pub fn format_nodes(rows: &[TermRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            row.name,
            row.size,
            row.gene_list(),
            row.stability
        ));
    }
    out
}

/// Render edge rows as header-less TSV, one row per line.
pub fn format_edges(rows: &[EdgeRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("{}\t{}\t{}\n", row.parent, row.child, row.kind));
    }
    out
}

pub fn write_nodes(path: &Path, rows: &[TermRow]) -> Result<(), TableError> {
    write(path, &format_nodes(rows))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote nodes table");
    Ok(())
}

pub fn write_edges(path: &Path, rows: &[EdgeRow]) -> Result<(), TableError> {
    write(path, &format_edges(rows))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote edges table");
    Ok(())
}

/// Write a nodes table and its edges table as a pair.
///
/// Both tables are rendered before anything touches the disk. If the edges
/// write fails, the nodes file just written is removed again.
pub fn write_tables(
    nodes_path: &Path,
    nodes: &[TermRow],
    edges_path: &Path,
    edges: &[EdgeRow],
) -> Result<(), TableError> {
    let nodes_content = format_nodes(nodes);
    let edges_content = format_edges(edges);

    write(nodes_path, &nodes_content)?;
    if let Err(err) = write(edges_path, &edges_content) {
        if let Err(cleanup) = std::fs::remove_file(nodes_path) {
            tracing::warn!(
                path = %nodes_path.display(),
                error = %cleanup,
                "could not remove nodes table after failed edges write"
            );
        }
        return Err(err);
    }
    tracing::debug!(
        nodes_path = %nodes_path.display(),
        nodes = nodes.len(),
        edges_path = %edges_path.display(),
        edges = edges.len(),
        "wrote node and edge tables"
    );
    Ok(())
}

fn write(path: &Path, content: &str) -> Result<(), TableError> {
    std::fs::write(path, content).map_err(|e| TableError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
