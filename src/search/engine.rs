use std::ops::ControlFlow;

use snafu::Snafu;
use tracing::{debug, info};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemBackend, Node, NodeId, TreeModel};
use crate::search::CancellationToken;

/// Depth-first search for directories by name.
///
/// A directory matches when its label equals the query ignoring case. Files
/// never match and are never descended into. Matches come back in pre-order:
/// each directory before its own subtree, subtrees in the order the backend
/// enumerates siblings. That order is whatever the OS yields, so the result
/// order is only as deterministic as the underlying enumeration.
pub struct SearchEngine<'a, B> {
    tree: &'a TreeModel<B>,
}

impl<'a, B: FilesystemBackend> SearchEngine<'a, B> {
    pub fn new(tree: &'a TreeModel<B>) -> Self {
        Self { tree }
    }

    /// All directories under the tree root named `query`.
    pub async fn find_by_name(&self, query: &str) -> Vec<Node> {
        self.find_by_name_from(query, self.tree.root()).await
    }

    /// All directories below `start` named `query`. `start` itself is never
    /// a candidate.
    pub async fn find_by_name_from(&self, query: &str, start: &NodeId) -> Vec<Node> {
        let mut matches = Vec::new();
        // Without a token the walk always runs to completion.
        let _ = self.walk(query, start, None, &mut matches).await;
        info!("Found {} directories named '{}'", matches.len(), query);
        matches
    }

    /// Like [`SearchEngine::find_by_name_from`], but stops before the next
    /// directory listing once `token` is cancelled.
    pub async fn find_by_name_cancellable(
        &self,
        query: &str,
        start: &NodeId,
        token: &CancellationToken,
    ) -> Result<Vec<Node>, SearchError> {
        let mut matches = Vec::new();
        match self.walk(query, start, Some(token), &mut matches).await {
            ControlFlow::Continue(()) => {
                info!("Found {} directories named '{}'", matches.len(), query);
                Ok(matches)
            }
            ControlFlow::Break(()) => {
                info!("Search for '{}' cancelled", query);
                Err(SearchError::Cancelled {
                    query: query.to_string(),
                    matches_so_far: matches.len(),
                })
            }
        }
    }

    async fn walk(
        &self,
        query: &str,
        dir: &NodeId,
        token: Option<&CancellationToken>,
        matches: &mut Vec<Node>,
    ) -> ControlFlow<()> {
        if token.is_some_and(CancellationToken::is_cancelled) {
            return ControlFlow::Break(());
        }

        for child in self.tree.list_children(dir).await {
            if !child.is_directory() {
                continue;
            }

            let child_id = child.id().clone();
            if child.label_matches(query) {
                debug!("Match: {}", child_id.best_effort_path_display());
                matches.push(child);
            }

            Box::pin(self.walk(query, &child_id, token, matches)).await?;
        }

        ControlFlow::Continue(())
    }
}

#[derive(Debug, Snafu)]
pub enum SearchError {
    #[snafu(display(
        "Search for '{}' was cancelled after {} matches",
        query,
        matches_so_far
    ))]
    Cancelled { query: String, matches_so_far: usize },
}
