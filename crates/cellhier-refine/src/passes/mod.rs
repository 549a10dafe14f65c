//! Structural refinement passes. Each pass takes the graph by exclusive
//! reference, recomputes the statistics it needs, and rescans from scratch
//! after every deletion instead of mutating a collection it is iterating.

pub mod collapse;
pub mod merge;
pub mod reorganize;
pub mod shortcut;

pub use collapse::{CollapseOutcome, RedundancyCollapser};
pub use merge::{MergeOutcome, ParentChildMerger};
pub use reorganize::{ContainmentReorganizer, ReorganizeOutcome};
pub use shortcut::ShortcutRemover;
