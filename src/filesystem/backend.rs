use compio::fs;
use tracing::debug;

use crate::ext::BestEffortPathExt;
use crate::filesystem::{NodeId, NodeKind};

/// Read-only access to a directory hierarchy.
///
/// Both operations fail soft: an entry that cannot be inspected is reported
/// as missing, and a directory that cannot be read has no entries.
pub trait FilesystemBackend {
    /// Kind of the entry at `id`, or `None` when it does not exist.
    async fn stat_kind(&self, id: &NodeId) -> Option<NodeKind>;

    /// Names and ids of the entries directly inside `id`, in enumeration order.
    async fn list_entries(&self, id: &NodeId) -> Vec<(String, NodeId)>;
}

impl<T: FilesystemBackend> FilesystemBackend for &T {
    async fn stat_kind(&self, id: &NodeId) -> Option<NodeKind> {
        (**self).stat_kind(id).await
    }

    async fn list_entries(&self, id: &NodeId) -> Vec<(String, NodeId)> {
        (**self).list_entries(id).await
    }
}

/// The real filesystem. Kind lookups follow symlinks, like `stat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl FilesystemBackend for LocalFilesystem {
    async fn stat_kind(&self, id: &NodeId) -> Option<NodeKind> {
        match fs::metadata(id.as_path()).await {
            Ok(metadata) if metadata.is_dir() => Some(NodeKind::Directory),
            Ok(_) => Some(NodeKind::File),
            Err(e) => {
                debug!("Cannot stat {}: {}", id.best_effort_path_display(), e);
                None
            }
        }
    }

    async fn list_entries(&self, id: &NodeId) -> Vec<(String, NodeId)> {
        let read_dir = match std::fs::read_dir(id.as_path()) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                debug!(
                    "Cannot read directory {}: {}",
                    id.best_effort_path_display(),
                    e
                );
                return Vec::new();
            }
        };

        read_dir
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    let file_name = entry.file_name();
                    let name = file_name.to_string_lossy().to_string();
                    Some((name, id.join(&file_name)))
                }
                Err(e) => {
                    debug!(
                        "Skipping unreadable entry in {}: {}",
                        id.best_effort_path_display(),
                        e
                    );
                    None
                }
            })
            .collect()
    }
}
