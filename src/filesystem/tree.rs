use std::path::Path;

use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemBackend, LocalFilesystem, Node, NodeId, NodeKind, TreeItem};

/// Lazy view of a directory hierarchy rooted at a fixed directory.
///
/// Nothing is cached: every [`TreeModel::list_children`] call reads the
/// backend again, so the tree always reflects the filesystem at call time.
#[derive(Debug)]
pub struct TreeModel<B = LocalFilesystem> {
    root: NodeId,
    backend: B,
}

impl TreeModel<LocalFilesystem> {
    /// Opens the real directory at `root`, resolved to an absolute path.
    pub async fn open(root: &Path) -> Result<Self, TreeModelCreationError> {
        let root = root.canonicalize().context(RootUnresolvableSnafu {
            path: root.best_effort_path_display(),
        })?;
        Self::with_backend(NodeId::from(root), LocalFilesystem).await
    }
}

impl<B: FilesystemBackend> TreeModel<B> {
    pub async fn with_backend(root: NodeId, backend: B) -> Result<Self, TreeModelCreationError> {
        match backend.stat_kind(&root).await {
            Some(NodeKind::Directory) => {
                info!("Opened tree at {}", root.best_effort_path_display());
                Ok(Self { root, backend })
            }
            Some(NodeKind::File) => Err(TreeModelCreationError::RootNotDirectory {
                path: root.best_effort_path_display(),
            }),
            None => Err(TreeModelCreationError::RootNotFound {
                path: root.best_effort_path_display(),
            }),
        }
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Immediate children of the directory `id`, in enumeration order.
    ///
    /// A directory that is missing or unreadable has no children. Entries
    /// that vanish before their kind can be determined are skipped.
    pub async fn list_children(&self, id: &NodeId) -> Vec<Node> {
        let entries = self.backend.list_entries(id).await;
        let mut children = Vec::with_capacity(entries.len());

        for (name, child_id) in entries {
            match self.backend.stat_kind(&child_id).await {
                Some(kind) => children.push(Node::new(name, child_id, kind)),
                None => debug!(
                    "Skipping {}: entry disappeared",
                    child_id.best_effort_path_display()
                ),
            }
        }

        children
    }

    pub fn tree_item(&self, node: &Node) -> TreeItem {
        TreeItem::from(node)
    }
}

#[derive(Debug, Snafu)]
pub enum TreeModelCreationError {
    #[snafu(display("Failed to resolve workspace root: {}", path))]
    RootUnresolvable {
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("Workspace root does not exist: {}", path))]
    RootNotFound { path: String },
    #[snafu(display("Workspace root is not a directory: {}", path))]
    RootNotDirectory { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{Collapsible, MemoryFilesystem};
    use std::fs::{File, create_dir_all};
    use tempfile::TempDir;

    fn labels(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(Node::label).collect()
    }

    #[compio::test]
    async fn root_is_fixed_at_construction() {
        let fs = MemoryFilesystem::new("/ws").dir("/ws/a");
        let tree = TreeModel::with_backend(NodeId::from("/ws"), fs)
            .await
            .expect("Failed to create tree");

        assert_eq!(tree.root(), &NodeId::from("/ws"));
    }

    #[compio::test]
    async fn missing_root_is_rejected() {
        let fs = MemoryFilesystem::new("/ws");
        let result = TreeModel::with_backend(NodeId::from("/elsewhere"), fs).await;

        assert!(matches!(
            result,
            Err(TreeModelCreationError::RootNotFound { .. })
        ));
    }

    #[compio::test]
    async fn file_root_is_rejected() {
        let fs = MemoryFilesystem::new("/ws").file("/ws/readme.md");
        let result = TreeModel::with_backend(NodeId::from("/ws/readme.md"), fs).await;

        assert!(matches!(
            result,
            Err(TreeModelCreationError::RootNotDirectory { .. })
        ));
    }

    #[compio::test]
    async fn open_rejects_nonexistent_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = TreeModel::open(&temp_dir.path().join("nope")).await;

        assert!(matches!(
            result,
            Err(TreeModelCreationError::RootUnresolvable { .. })
        ));
    }

    #[compio::test]
    async fn children_keep_enumeration_order_and_kinds() {
        let fs = MemoryFilesystem::new("/ws")
            .dir("/ws/zeta")
            .file("/ws/alpha.txt")
            .dir("/ws/mid");
        let tree = TreeModel::with_backend(NodeId::from("/ws"), fs)
            .await
            .expect("Failed to create tree");

        let children = tree.list_children(tree.root()).await;

        assert_eq!(labels(&children), vec!["zeta", "alpha.txt", "mid"]);
        assert_eq!(children[0].kind(), NodeKind::Directory);
        assert_eq!(children[1].kind(), NodeKind::File);
        assert_eq!(children[1].id(), &NodeId::from("/ws/alpha.txt"));
    }

    #[compio::test]
    async fn unreadable_directory_has_no_children() {
        let fs = MemoryFilesystem::new("/ws")
            .dir("/ws/locked/inner")
            .unreadable("/ws/locked");
        let tree = TreeModel::with_backend(NodeId::from("/ws"), fs)
            .await
            .expect("Failed to create tree");

        assert!(tree.list_children(&NodeId::from("/ws/locked")).await.is_empty());
        assert!(tree.list_children(&NodeId::from("/ws/absent")).await.is_empty());
    }

    #[compio::test]
    async fn vanished_entries_are_skipped() {
        let fs = MemoryFilesystem::new("/ws")
            .dir("/ws/a")
            .dangling("/ws/ghost")
            .dir("/ws/b");
        let tree = TreeModel::with_backend(NodeId::from("/ws"), fs)
            .await
            .expect("Failed to create tree");

        let children = tree.list_children(tree.root()).await;

        assert_eq!(labels(&children), vec!["a", "b"]);
    }

    #[compio::test]
    async fn listing_is_never_cached() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tree = TreeModel::open(temp_dir.path())
            .await
            .expect("Failed to create tree");
        assert!(tree.list_children(tree.root()).await.is_empty());

        create_dir_all(temp_dir.path().join("later")).expect("Failed to create dir");
        File::create(temp_dir.path().join("later.txt")).expect("Failed to create file");

        let mut children = tree.list_children(tree.root()).await;
        children.sort_by(|a, b| a.label().cmp(b.label()));
        assert_eq!(labels(&children), vec!["later", "later.txt"]);
    }

    #[compio::test]
    async fn tree_item_reflects_node_kind() {
        let fs = MemoryFilesystem::new("/ws").dir("/ws/src").file("/ws/lib.rs");
        let tree = TreeModel::with_backend(NodeId::from("/ws"), fs)
            .await
            .expect("Failed to create tree");

        let children = tree.list_children(tree.root()).await;
        let items: Vec<TreeItem> = children.iter().map(|n| tree.tree_item(n)).collect();

        assert_eq!(items[0].collapsible, Collapsible::Collapsed);
        assert_eq!(items[1].collapsible, Collapsible::None);
        assert_eq!(items[1].open_target, Some(NodeId::from("/ws/lib.rs")));
    }
}
