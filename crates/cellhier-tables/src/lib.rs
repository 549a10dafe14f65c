//! # cellhier-tables
//!
//! Reads and writes the tab-separated node/edge tables produced by the
//! community-detection step, and encodes refined hierarchies for the
//! hierarchy-to-network converter.

pub mod cdaps;
pub mod reader;
pub mod translate;
pub mod writer;

pub use cdaps::{CommunityDetectionResult, encode_community_detection};
pub use reader::{parse_edges, parse_nodes, read_edges, read_nodes};
pub use translate::translate_members;
pub use writer::{format_edges, format_nodes, write_edges, write_nodes, write_tables};
