//! Canvas session - delayed create and blend requests against a shared store.
//!
//! Requests apply after their processing delay. A new request of the same
//! kind cancels the pending one; the cancelled request's receiver then
//! resolves with a `RecvError`. A replaced request never applies, even when
//! its timer already fired and is waiting for the store lock.

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::canvas::BlendProposal;
use crate::domain::{Branch, BranchId};
use crate::infrastructure::config::ProcessingSettings;
use crate::store::{MergeOutcome, SharedStore, StoreError};
use crate::timers::TimerRegistry;

/// Kind of delayed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingKind {
    /// Branch creation.
    CreateBranch,
    /// Confirmed blend.
    Blend,
}

/// Delayed store requests for one canvas.
///
/// Must be used from within a tokio runtime.
pub struct CanvasSession {
    store: SharedStore,
    settings: ProcessingSettings,
    timers: TimerRegistry<ProcessingKind>,
}

impl CanvasSession {
    /// Creates a session over `store`.
    #[must_use]
    pub fn new(store: SharedStore, settings: ProcessingSettings) -> Self {
        Self {
            store,
            settings,
            timers: TimerRegistry::new(),
        }
    }

    /// Returns the shared store.
    #[must_use]
    pub fn store(&self) -> SharedStore {
        SharedStore::clone(&self.store)
    }

    /// Checks if a request of `kind` is still waiting.
    #[must_use]
    pub fn is_pending(&self, kind: ProcessingKind) -> bool {
        self.timers.is_armed(kind)
    }

    /// Creates a branch under `parent_id` after the create delay.
    pub fn request_branch(
        &mut self,
        parent_id: BranchId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> oneshot::Receiver<Result<Branch, StoreError>> {
        let (tx, rx) = oneshot::channel();
        let store = SharedStore::clone(&self.store);
        let name = name.into();
        let description = description.into();

        debug!(parent_id = %parent_id, "Branch creation requested");
        self.timers.arm_with(
            ProcessingKind::CreateBranch,
            self.settings.create_delay(),
            move |token| async move {
                let mut graph = store.write();
                if !token.is_current() {
                    debug!(parent_id = %parent_id, "Superseded branch request dropped");
                    return;
                }
                let result = graph.create_branch(&parent_id, &name, &description);
                drop(graph);
                if tx.send(result).is_err() {
                    debug!("Branch requester went away before the reply");
                }
            },
        );
        rx
    }

    /// Applies a confirmed blend after the blend delay.
    pub fn request_blend(
        &mut self,
        proposal: BlendProposal,
    ) -> oneshot::Receiver<Option<MergeOutcome>> {
        let (tx, rx) = oneshot::channel();
        let store = SharedStore::clone(&self.store);

        info!(
            source_id = %proposal.source_id,
            target_id = %proposal.target_id,
            "Blend confirmed"
        );
        self.timers.arm_with(
            ProcessingKind::Blend,
            self.settings.blend_delay(),
            move |token| async move {
                let mut graph = store.write();
                if !token.is_current() {
                    debug!(source_id = %proposal.source_id, "Superseded blend dropped");
                    return;
                }
                let outcome = graph.merge_branches(&proposal.source_id, &proposal.target_id);
                drop(graph);
                if tx.send(outcome).is_err() {
                    debug!("Blend requester went away before the reply");
                }
            },
        );
        rx
    }

    /// Cancels a pending request. Returns whether one was waiting.
    pub fn cancel(&mut self, kind: ProcessingKind) -> bool {
        self.timers.cancel(kind)
    }
}
