//! Flat-table models shared by the table I/O and the refinement engine.

pub mod edge_row;
pub mod term_row;

pub use edge_row::{EdgeKind, EdgeRow};
pub use term_row::TermRow;
