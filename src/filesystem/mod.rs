//! Lazy directory tree over a filesystem.
//!
//! Nodes are produced on demand from a [`FilesystemBackend`] and never own
//! their subtree; children are listed again each time they are needed.

mod backend;
mod events;
#[cfg(test)]
mod memory;
mod node;
mod tree;

pub use backend::{FilesystemBackend, LocalFilesystem};
pub use events::{TreeEvent, TreeEvents};
#[cfg(test)]
pub use memory::MemoryFilesystem;
pub use node::{Collapsible, Node, NodeId, NodeKind, TreeItem};
pub use tree::{TreeModel, TreeModelCreationError};
