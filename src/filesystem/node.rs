use std::path::{Path, PathBuf};

use derive_more::{Deref, From, Into};

/// Opaque handle locating a filesystem entry.
///
/// Wraps the entry's absolute path. Two ids are equal when their paths are
/// equal, which holds for the lifetime of a single traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, From, Into)]
pub struct NodeId(PathBuf);

impl NodeId {
    pub fn join(&self, name: impl AsRef<Path>) -> Self {
        Self(self.0.join(name))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for NodeId {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&Path> for NodeId {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl From<&str> for NodeId {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    File,
}

/// One filesystem entry, built fresh every time its parent is listed.
///
/// Children are never stored on the node; ask the [`TreeModel`] for them
/// using [`Node::id`].
///
/// [`TreeModel`]: super::TreeModel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    id: NodeId,
    kind: NodeKind,
}

impl Node {
    pub fn new(label: impl Into<String>, id: NodeId, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            id,
            kind,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Case-insensitive comparison of the label against `name`.
    pub fn label_matches(&self, name: &str) -> bool {
        self.label.to_lowercase() == name.to_lowercase()
    }

    pub fn into_id(self) -> NodeId {
        self.id
    }
}

/// Whether a tree view should draw an expander for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapsible {
    Collapsed,
    None,
}

/// Display data for one node, the counterpart of a tree view's item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub label: String,
    pub collapsible: Collapsible,
    /// Set for files only: the entry a display layer opens on activation.
    pub open_target: Option<NodeId>,
}

impl From<&Node> for TreeItem {
    fn from(node: &Node) -> Self {
        match node.kind() {
            NodeKind::Directory => TreeItem {
                label: node.label().to_string(),
                collapsible: Collapsible::Collapsed,
                open_target: None,
            },
            NodeKind::File => TreeItem {
                label: node.label().to_string(),
                collapsible: Collapsible::None,
                open_target: Some(node.id().clone()),
            },
        }
    }
}
