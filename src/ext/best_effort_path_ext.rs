use std::path::{Component, Path, PathBuf};

use crate::filesystem::NodeId;

/// Renders `path` for messages: canonical when it exists, otherwise made
/// absolute against the current directory with `.` and `..` folded away.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical_path) = path.canonicalize() {
        return canonical_path.display().to_string();
    }

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|current_dir| current_dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    normalize_path(&absolute_path).display().to_string()
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(components.last(), None | Some(Component::RootDir)) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for NodeId {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_path())
    }
}
