//! Store change notifications.
//!
//! Every successful store mutation publishes one `StoreEvent` so a view layer
//! can re-render. Delivery is best effort; lagging subscribers skip ahead.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::{BranchId, CommentId, MutationKind, ProjectId};

const EVENT_CAPACITY: usize = 256;

/// A change made to the branch graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A project was loaded into a new store.
    ProjectLoaded {
        /// Loaded project.
        project_id: ProjectId,
        /// Number of branches loaded.
        branch_count: usize,
    },
    /// A branch was created.
    BranchCreated {
        /// New branch.
        branch_id: BranchId,
        /// Parent it was branched from.
        parent_id: BranchId,
    },
    /// A branch was changed by a typed mutation.
    BranchUpdated {
        /// Changed branch.
        branch_id: BranchId,
        /// Kind of change.
        mutation: MutationKind,
    },
    /// A branch and its subtree were removed.
    BranchesDeleted {
        /// Removed branches, subtree root first.
        branch_ids: Vec<BranchId>,
    },
    /// Two branches were blended and retired.
    BranchesMerged {
        /// Branch that was dropped onto the target.
        source_id: BranchId,
        /// Branch it was blended into.
        target_id: BranchId,
    },
    /// A comment was appended.
    CommentAdded {
        /// Commented branch.
        branch_id: BranchId,
        /// New comment.
        comment_id: CommentId,
    },
    /// Unpositioned branches received layout seed positions.
    PositionsSeeded {
        /// Number of branches positioned.
        count: usize,
    },
}

/// Fan-out channel for store events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribes to subsequent events.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        debug!(subscribers = self.subscriber_count(), "Store subscriber added");
        EventReceiver {
            inner: self.sender.subscribe(),
            subscriber_count: Arc::clone(&self.subscriber_count),
        }
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: StoreEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "Store event published"),
            Err(_) => debug!("Store event dropped, no subscribers"),
        }
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of an `EventBus` subscription.
pub struct EventReceiver {
    inner: broadcast::Receiver<StoreEvent>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventReceiver {
    /// Waits for the next event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Store subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        loop {
            match self.inner.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Store subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }

    /// Drains every queued event.
    pub fn drain(&mut self) -> Vec<StoreEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl Drop for EventReceiver {
    fn drop(&mut self) {
        self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
    }
}
