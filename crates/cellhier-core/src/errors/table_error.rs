//! Flat-table errors: reading, writing, and converting node/edge tables.

/// Errors raised while reading or converting node/edge tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed row at {source_name}:{line}: expected {expected} columns, found {actual}")]
    MalformedRow {
        source_name: String,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {field} at {source_name}:{line}: {value:?}")]
    InvalidField {
        source_name: String,
        line: usize,
        field: String,
        value: String,
    },

    #[error("unknown edge type at {source_name}:{line}: {value:?}")]
    UnknownEdgeType {
        source_name: String,
        line: usize,
        value: String,
    },

    #[error("member {member:?} of term {term} is not an integer node id")]
    NonNumericMember { term: String, member: String },

    #[error("member {member:?} of term {term} has no name mapping")]
    UnknownMemberId { term: String, member: String },
}
