//! Tab-separated node/edge table parsing.
//!
//! Both tables are header-less. Blank lines are ignored; any other row with the
//! wrong number of columns aborts the parse.

use std::path::Path;

use cellhier_core::errors::TableError;
use cellhier_core::models::{EdgeKind, EdgeRow, TermRow};

const NODE_COLUMNS: usize = 4;
const EDGE_COLUMNS: usize = 3;

/// Read a `<prefix>.nodes` table from disk.
pub fn read_nodes(path: &Path) -> Result<Vec<TermRow>, TableError> {
    let content = read_to_string(path)?;
    let rows = parse_nodes(&content, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read nodes table");
    Ok(rows)
}

/// Read a `<prefix>.edges` table from disk.
pub fn read_edges(path: &Path) -> Result<Vec<EdgeRow>, TableError> {
    let content = read_to_string(path)?;
    let rows = parse_edges(&content, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read edges table");
    Ok(rows)
}

/// Parse nodes table content: term name, term size, space-separated genes, stability.
///
/// `source_name` only labels error messages.
pub fn parse_nodes(content: &str, source_name: &str) -> Result<Vec<TermRow>, TableError> {
    let mut rows = Vec::new();
    for (line_no, fields) in split_rows(content, NODE_COLUMNS, source_name)? {
        let name = non_empty(fields[0], "term name", source_name, line_no)?;
        let size = fields[1]
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid_field(source_name, line_no, "term size", fields[1]))?;
        let genes: Vec<String> = fields[2]
            .split(' ')
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        let stability = fields[3]
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_field(source_name, line_no, "stability", fields[3]))?;

        rows.push(TermRow {
            name,
            size,
            genes,
            stability,
        });
    }
    Ok(rows)
}

/// Parse edges table content: parent term, child term, edge type literal.
pub fn parse_edges(content: &str, source_name: &str) -> Result<Vec<EdgeRow>, TableError> {
    let mut rows = Vec::new();
    for (line_no, fields) in split_rows(content, EDGE_COLUMNS, source_name)? {
        let parent = non_empty(fields[0], "parent term", source_name, line_no)?;
        let child = non_empty(fields[1], "child term", source_name, line_no)?;
        let kind = fields[2]
            .trim()
            .parse::<EdgeKind>()
            .map_err(|value| TableError::UnknownEdgeType {
                source_name: source_name.to_string(),
                line: line_no,
                value,
            })?;
        rows.push(EdgeRow {
            parent,
            child,
            kind,
        });
    }
    Ok(rows)
}

/// Split content into tab-separated rows with 1-based line numbers.
fn split_rows<'a>(
    content: &'a str,
    expected: usize,
    source_name: &str,
) -> Result<Vec<(usize, Vec<&'a str>)>, TableError> {
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != expected {
            return Err(TableError::MalformedRow {
                source_name: source_name.to_string(),
                line: idx + 1,
                expected,
                actual: fields.len(),
            });
        }
        rows.push((idx + 1, fields));
    }
    Ok(rows)
}

fn non_empty(
    value: &str,
    field: &str,
    source_name: &str,
    line: usize,
) -> Result<String, TableError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid_field(source_name, line, field, value));
    }
    Ok(trimmed.to_string())
}

fn invalid_field(source_name: &str, line: usize, field: &str, value: &str) -> TableError {
    TableError::InvalidField {
        source_name: source_name.to_string(),
        line,
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn read_to_string(path: &Path) -> Result<String, TableError> {
    std::fs::read_to_string(path).map_err(|e| TableError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_rows_skips_blank_lines_and_keeps_line_numbers() {
        let rows = split_rows("a\tb\tc\n\n d\te\tf\r\n", 3, "t").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[1].0, 3);
        assert_eq!(rows[1].1[2], "f");
    }

    #[test]
    fn split_rows_rejects_wrong_column_count() {
        let err = split_rows("a\tb\n", 3, "t").unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedRow {
                line: 1,
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }
}
