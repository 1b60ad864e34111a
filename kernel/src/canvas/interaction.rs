//! Drag gestures on the canvas and blend detection.
//!
//! A gesture moves `Idle -> Dragging -> Dropped`. While dragging, the store is
//! not written; the node's live position is held in the gesture. On drop the
//! node either moves (one `Reposition` mutation) or, when it overlaps another
//! node, stays at its origin and a blend proposal is raised.

use metrics::counter;
use tracing::{debug, info};

use crate::domain::{BranchId, BranchMutation, Position};
use crate::infrastructure::config::CanvasSettings;
use crate::store::{BranchGraphStore, StoreError};

use super::geometry::find_blend_target;
use super::proposal::{BlendProposal, BlendProposalSink};

/// Errors raised by misuse of the drag controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InteractionError {
    /// The branch to drag does not exist.
    #[error("Unknown branch: {0}")]
    UnknownBranch(BranchId),
    /// The branch has no canvas position yet.
    #[error("Branch {0} has no position")]
    Unpositioned(BranchId),
    /// A drag is already in progress.
    #[error("A drag of {0} is already in progress")]
    GestureInProgress(BranchId),
    /// No drag is in progress.
    #[error("No drag in progress")]
    NotDragging,
    /// Persisting the drop failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    /// Dragged branch.
    pub branch_id: BranchId,
    /// Position before the drag started.
    pub origin: Position,
    /// Live position under the pointer.
    pub current: Position,
    /// Node currently overlapped, if any.
    pub blend_target: Option<BranchId>,
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The node was moved and the new position persisted.
    Moved {
        /// Moved branch.
        branch_id: BranchId,
        /// Persisted position.
        position: Position,
    },
    /// The node was dropped onto another node.
    BlendProposed {
        /// Proposal sent to the confirmation sink.
        proposal: BlendProposal,
        /// Position the dragged node keeps.
        reverted_to: Position,
    },
    /// The gesture was abandoned.
    Cancelled {
        /// Dragged branch.
        branch_id: BranchId,
        /// Position the node keeps.
        reverted_to: Position,
    },
}

/// Phase of the drag state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// A node is being dragged.
    Dragging(DragGesture),
    /// The last gesture ended.
    Dropped(DropOutcome),
}

/// Drag-and-blend state machine for one canvas.
#[derive(Debug, Clone)]
pub struct CanvasInteractionController {
    settings: CanvasSettings,
    phase: DragPhase,
}

impl CanvasInteractionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(settings: CanvasSettings) -> Self {
        Self {
            settings,
            phase: DragPhase::Idle,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Returns the gesture in progress.
    #[must_use]
    pub const fn gesture(&self) -> Option<&DragGesture> {
        match &self.phase {
            DragPhase::Dragging(gesture) => Some(gesture),
            _ => None,
        }
    }

    /// Checks if the dragged node currently overlaps another node.
    #[must_use]
    pub fn has_blend_target(&self) -> bool {
        self.blend_target().is_some()
    }

    /// Returns the node currently overlapped by the dragged node.
    #[must_use]
    pub fn blend_target(&self) -> Option<&BranchId> {
        self.gesture().and_then(|gesture| gesture.blend_target.as_ref())
    }

    /// Starts dragging `id` from its stored position.
    ///
    /// Allowed from `Idle` and `Dropped`. Returns the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag is in progress, the branch is unknown, or
    /// it has no position.
    pub fn begin_drag(
        &mut self,
        store: &BranchGraphStore,
        id: &BranchId,
    ) -> Result<Position, InteractionError> {
        if let Some(gesture) = self.gesture() {
            return Err(InteractionError::GestureInProgress(gesture.branch_id.clone()));
        }
        let branch = store
            .get_branch_by_id(id)
            .ok_or_else(|| InteractionError::UnknownBranch(id.clone()))?;
        let origin = branch
            .position()
            .ok_or_else(|| InteractionError::Unpositioned(id.clone()))?;

        debug!(branch_id = %id, "Drag started");
        self.phase = DragPhase::Dragging(DragGesture {
            branch_id: id.clone(),
            origin,
            current: origin,
            blend_target: None,
        });
        Ok(origin)
    }

    /// Moves the dragged node and recomputes the blend target.
    ///
    /// Returns the blend target after the move.
    ///
    /// # Errors
    ///
    /// Returns `InteractionError::NotDragging` outside a drag.
    pub fn drag_to(
        &mut self,
        store: &BranchGraphStore,
        position: Position,
    ) -> Result<Option<&BranchId>, InteractionError> {
        let DragPhase::Dragging(gesture) = &mut self.phase else {
            return Err(InteractionError::NotDragging);
        };
        gesture.current = position;
        gesture.blend_target =
            find_blend_target(store.branches(), &gesture.branch_id, position, &self.settings);
        Ok(gesture.blend_target.as_ref())
    }

    /// Ends the drag.
    ///
    /// With a blend target the node keeps its origin and a proposal goes to
    /// `sink`; otherwise the live position is persisted. The blend target is
    /// cleared either way.
    ///
    /// # Errors
    ///
    /// Returns `InteractionError::NotDragging` outside a drag, or the store
    /// error if persisting fails. A failed drop still ends the gesture as
    /// cancelled.
    pub fn drop(
        &mut self,
        store: &mut BranchGraphStore,
        sink: &dyn BlendProposalSink,
    ) -> Result<DropOutcome, InteractionError> {
        let gesture = match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(gesture) => gesture,
            other => {
                self.phase = other;
                return Err(InteractionError::NotDragging);
            }
        };
        let DragGesture {
            branch_id,
            origin,
            current,
            blend_target,
        } = gesture;

        let outcome = match blend_target.filter(|target| *target != branch_id) {
            Some(target_id) => {
                let proposal = BlendProposal {
                    source_id: branch_id,
                    target_id,
                };
                counter!("sprig_blend_proposals_total").increment(1);
                info!(
                    source_id = %proposal.source_id,
                    target_id = %proposal.target_id,
                    "Blend proposed"
                );
                sink.propose(proposal.clone());
                DropOutcome::BlendProposed {
                    proposal,
                    reverted_to: origin,
                }
            }
            None => match store.update_branch(&branch_id, BranchMutation::Reposition(current)) {
                Ok(Some(_)) => DropOutcome::Moved {
                    branch_id,
                    position: current,
                },
                Ok(None) => DropOutcome::Cancelled {
                    branch_id,
                    reverted_to: origin,
                },
                Err(err) => {
                    self.phase = DragPhase::Dropped(DropOutcome::Cancelled {
                        branch_id,
                        reverted_to: origin,
                    });
                    return Err(err.into());
                }
            },
        };

        self.phase = DragPhase::Dropped(outcome.clone());
        Ok(outcome)
    }

    /// Abandons the drag; the node keeps its origin.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn cancel(&mut self) -> Option<DropOutcome> {
        let DragPhase::Dragging(gesture) = &self.phase else {
            return None;
        };
        let outcome = DropOutcome::Cancelled {
            branch_id: gesture.branch_id.clone(),
            reverted_to: gesture.origin,
        };
        debug!(branch_id = %gesture.branch_id, "Drag cancelled");
        self.phase = DragPhase::Dropped(outcome.clone());
        Some(outcome)
    }

    /// Returns a finished controller to `Idle`. No effect mid-drag.
    pub fn reset(&mut self) {
        if matches!(self.phase, DragPhase::Dropped(_)) {
            self.phase = DragPhase::Idle;
        }
    }
}
