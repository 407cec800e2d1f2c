use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::ext::BestEffortPathExt;
use crate::filesystem::NodeId;

/// Signals sent to whatever displays the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// Reveal and expand the node with this id.
    Reveal(NodeId),
    /// The displayed tree may be stale and should be redrawn.
    Refresh,
}

/// Observer registry for [`TreeEvent`]s.
#[derive(Debug, Default)]
pub struct TreeEvents {
    subscribers: Vec<UnboundedSender<TreeEvent>>,
}

impl TreeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<TreeEvent> {
        let (sender, receiver) = mpsc::unbounded();
        self.subscribers.push(sender);
        receiver
    }

    pub fn reveal(&mut self, id: NodeId) {
        debug!("Requesting reveal of {}", id.best_effort_path_display());
        self.emit(TreeEvent::Reveal(id));
    }

    pub fn refresh(&mut self) {
        self.emit(TreeEvent::Refresh);
    }

    /// Sends `event` to every live subscriber and forgets the dropped ones.
    fn emit(&mut self, event: TreeEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.unbounded_send(event.clone()).is_ok());
        debug!(
            "Emitted {:?} to {} subscribers",
            event,
            self.subscriber_count()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
