use futures_channel::mpsc::UnboundedReceiver;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemBackend, NodeId, TreeEvent, TreeEvents, TreeModel};
use crate::navigation::{Candidate, Chooser, Resolution};
use crate::search::{CancellationToken, SearchEngine, SearchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Revealed(NodeId),
    NotFound { query: String },
    Aborted,
}

/// Ties a query to a revealed directory: search, disambiguate, then signal
/// the display layer.
pub struct Navigator<B> {
    tree: TreeModel<B>,
    events: TreeEvents,
    cancellation: CancellationToken,
}

impl<B: FilesystemBackend> Navigator<B> {
    pub fn new(tree: TreeModel<B>) -> Self {
        Self {
            tree,
            events: TreeEvents::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Token that stops the search of any running or later [`Navigator::navigate`].
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<TreeEvent> {
        self.events.subscribe()
    }

    pub async fn find_directories_by_name(&self, query: &str) -> Vec<Candidate> {
        SearchEngine::new(&self.tree)
            .find_by_name(query)
            .await
            .iter()
            .map(Candidate::from)
            .collect()
    }

    /// Finds the directory named `query`, asking `chooser` when more than one
    /// matches, and requests that it be revealed.
    pub async fn navigate(
        &mut self,
        query: &str,
        chooser: &mut impl Chooser,
    ) -> Result<NavigationOutcome, NavigationError> {
        let matches = SearchEngine::new(&self.tree)
            .find_by_name_cancellable(query, self.tree.root(), &self.cancellation)
            .await
            .context(SearchSnafu)?;

        let target = match Resolution::from(matches) {
            Resolution::NotFound => {
                info!("No directory named '{}'", query);
                return Ok(NavigationOutcome::NotFound {
                    query: query.to_string(),
                });
            }
            Resolution::Unique(node) => node.into_id(),
            resolution @ Resolution::Ambiguous(_) => {
                let candidates = resolution.candidates();
                let count = candidates.len();
                debug!("{} directories named '{}'", count, query);

                let Some(index) = chooser.choose(&candidates).await else {
                    warn!("No directory chosen for '{}'", query);
                    return Ok(NavigationOutcome::Aborted);
                };
                candidates
                    .into_iter()
                    .nth(index)
                    .map(|candidate| candidate.identifier)
                    .ok_or(NavigationError::InvalidChoice { index, count })?
            }
        };

        self.reveal(target.clone());
        Ok(NavigationOutcome::Revealed(target))
    }

    /// Asks subscribers to reveal `id`, then to redraw.
    pub fn reveal(&mut self, id: NodeId) {
        info!("Revealing {}", id.best_effort_path_display());
        self.events.reveal(id);
        self.events.refresh();
    }
}

#[derive(Debug, Snafu)]
pub enum NavigationError {
    #[snafu(display("Search did not complete"))]
    SearchError { source: SearchError },
    #[snafu(display("Chose match {} but only {} were offered", index, count))]
    InvalidChoice { index: usize, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use crate::navigation::{AbortChooser, FirstChooser};
    use futures::{StreamExt, executor::block_on};

    struct FixedChooser {
        pick: Option<usize>,
        offered: Vec<Candidate>,
    }

    impl Chooser for FixedChooser {
        async fn choose(&mut self, candidates: &[Candidate]) -> Option<usize> {
            self.offered = candidates.to_vec();
            self.pick
        }
    }

    async fn navigator() -> Navigator<MemoryFilesystem> {
        let fs = MemoryFilesystem::new("/ws")
            .dir("/ws/a/y/target")
            .dir("/ws/target")
            .dir("/ws/only/here");
        let tree = TreeModel::with_backend(NodeId::from("/ws"), fs)
            .await
            .expect("Failed to create tree");
        Navigator::new(tree)
    }

    #[compio::test]
    async fn unique_match_is_revealed_then_refreshed() {
        let mut navigator = navigator().await;
        let mut events = navigator.subscribe();

        let outcome = navigator
            .navigate("HERE", &mut AbortChooser)
            .await
            .expect("Navigation failed");

        assert_eq!(
            outcome,
            NavigationOutcome::Revealed(NodeId::from("/ws/only/here"))
        );
        assert_eq!(
            block_on(events.next()),
            Some(TreeEvent::Reveal(NodeId::from("/ws/only/here")))
        );
        assert_eq!(block_on(events.next()), Some(TreeEvent::Refresh));
    }

    #[compio::test]
    async fn not_found_emits_nothing() {
        let mut navigator = navigator().await;
        let events = navigator.subscribe();

        let outcome = navigator
            .navigate("missing", &mut FirstChooser)
            .await
            .expect("Navigation failed");

        assert_eq!(
            outcome,
            NavigationOutcome::NotFound {
                query: "missing".to_string()
            }
        );
        drop(navigator);
        assert_eq!(block_on(events.collect::<Vec<_>>()), Vec::new());
    }

    #[compio::test]
    async fn ambiguous_match_offers_candidates_in_discovery_order() {
        let mut navigator = navigator().await;
        let mut chooser = FixedChooser {
            pick: Some(1),
            offered: Vec::new(),
        };

        let outcome = navigator
            .navigate("target", &mut chooser)
            .await
            .expect("Navigation failed");

        let descriptions: Vec<&str> = chooser
            .offered
            .iter()
            .map(|c| c.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["/ws/a/y/target", "/ws/target"]);
        assert!(chooser.offered.iter().all(|c| c.label == "target"));
        assert_eq!(
            outcome,
            NavigationOutcome::Revealed(NodeId::from("/ws/target"))
        );
    }

    #[compio::test]
    async fn declined_choice_aborts_without_events() {
        let mut navigator = navigator().await;
        let events = navigator.subscribe();

        let outcome = navigator
            .navigate("target", &mut AbortChooser)
            .await
            .expect("Navigation failed");

        assert_eq!(outcome, NavigationOutcome::Aborted);
        drop(navigator);
        assert_eq!(block_on(events.collect::<Vec<_>>()), Vec::new());
    }

    #[compio::test]
    async fn out_of_range_choice_is_an_error() {
        let mut navigator = navigator().await;
        let mut chooser = FixedChooser {
            pick: Some(7),
            offered: Vec::new(),
        };

        let result = navigator.navigate("target", &mut chooser).await;

        assert!(matches!(
            result,
            Err(NavigationError::InvalidChoice { index: 7, count: 2 })
        ));
    }

    #[compio::test]
    async fn cancelled_search_is_an_error() {
        let mut navigator = navigator().await;
        let events = navigator.subscribe();
        navigator.cancellation_token().cancel();

        let result = navigator.navigate("here", &mut FirstChooser).await;

        assert!(matches!(result, Err(NavigationError::SearchError { .. })));
        drop(navigator);
        assert_eq!(block_on(events.collect::<Vec<_>>()), Vec::new());
    }

    #[compio::test]
    async fn candidates_expose_label_and_identifier() {
        let navigator = navigator().await;

        let candidates = navigator.find_directories_by_name("Target").await;

        assert_eq!(
            candidates
                .iter()
                .map(|c| c.identifier.clone())
                .collect::<Vec<_>>(),
            vec![NodeId::from("/ws/a/y/target"), NodeId::from("/ws/target")]
        );
    }
}
