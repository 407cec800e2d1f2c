//! In-memory backend with a fixed enumeration order and injectable read
//! failures.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::filesystem::{FilesystemBackend, NodeId, NodeKind};

#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    kinds: HashMap<NodeId, NodeKind>,
    children: HashMap<NodeId, Vec<String>>,
    unreadable: HashSet<NodeId>,
    listed: RefCell<Vec<NodeId>>,
}

impl MemoryFilesystem {
    pub fn new(root: &str) -> Self {
        let mut fs = Self::default();
        fs.kinds.insert(NodeId::from(root), NodeKind::Directory);
        fs
    }

    /// Adds a directory, creating missing parents. Siblings enumerate in
    /// insertion order.
    pub fn dir(mut self, path: &str) -> Self {
        self.insert(NodeId::from(path), NodeKind::Directory);
        self
    }

    pub fn file(mut self, path: &str) -> Self {
        self.insert(NodeId::from(path), NodeKind::File);
        self
    }

    /// Makes listing `path` fail, while its own kind stays visible.
    pub fn unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(NodeId::from(path));
        self
    }

    /// Lists `path` in its parent without giving it a kind, like an entry
    /// removed between enumeration and stat.
    pub fn dangling(mut self, path: &str) -> Self {
        let id = NodeId::from(path);
        if let (Some(parent), Some(name)) = (id.parent(), id.file_name()) {
            let parent = NodeId::from(parent);
            self.insert(parent.clone(), NodeKind::Directory);
            self.children
                .entry(parent)
                .or_default()
                .push(name.to_string_lossy().to_string());
        }
        self
    }

    /// Every directory listed so far, in call order.
    pub fn listed(&self) -> Vec<NodeId> {
        self.listed.borrow().clone()
    }

    fn insert(&mut self, id: NodeId, kind: NodeKind) {
        if self.kinds.contains_key(&id) {
            return;
        }
        if let (Some(parent), Some(name)) = (id.parent(), id.file_name()) {
            let parent = NodeId::from(parent);
            self.insert(parent.clone(), NodeKind::Directory);
            self.children
                .entry(parent)
                .or_default()
                .push(name.to_string_lossy().to_string());
        }
        self.kinds.insert(id, kind);
    }
}

impl FilesystemBackend for MemoryFilesystem {
    async fn stat_kind(&self, id: &NodeId) -> Option<NodeKind> {
        self.kinds.get(id).copied()
    }

    async fn list_entries(&self, id: &NodeId) -> Vec<(String, NodeId)> {
        self.listed.borrow_mut().push(id.clone());
        if self.unreadable.contains(id) {
            return Vec::new();
        }
        self.children
            .get(id)
            .map(|names| {
                names
                    .iter()
                    .map(|name| (name.clone(), id.join(name)))
                    .collect()
            })
            .unwrap_or_default()
    }
}
