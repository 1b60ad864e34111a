//! Blend proposals - requests to merge one branch into another.
//!
//! The canvas raises a proposal when a card is dropped onto another card. A
//! confirmation step receives it through a [`BlendProposalSink`] and decides
//! whether to call `merge_branches`.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::BranchId;

/// A pending request to blend `source_id` into `target_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlendProposal {
    /// Branch that was dragged.
    pub source_id: BranchId,
    /// Branch it was dropped onto.
    pub target_id: BranchId,
}

/// Receiver of blend proposals, typically a merge confirmation dialog.
pub trait BlendProposalSink: Send + Sync {
    /// Delivers one proposal.
    fn propose(&self, proposal: BlendProposal);
}

impl BlendProposalSink for mpsc::UnboundedSender<BlendProposal> {
    fn propose(&self, proposal: BlendProposal) {
        if let Err(err) = self.send(proposal) {
            warn!(source_id = %err.0.source_id, "Blend proposal dropped, confirmation closed");
        }
    }
}

/// Creates a channel-backed proposal sink.
#[must_use]
pub fn proposal_channel() -> (
    mpsc::UnboundedSender<BlendProposal>,
    mpsc::UnboundedReceiver<BlendProposal>,
) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_delivers_proposals() {
        let (tx, mut rx) = proposal_channel();
        let proposal = BlendProposal {
            source_id: BranchId::new("branch_a"),
            target_id: BranchId::new("branch_b"),
        };
        tx.propose(proposal.clone());
        assert_eq!(rx.try_recv().unwrap(), proposal);
    }

    #[test]
    fn closed_channel_is_tolerated() {
        let (tx, rx) = proposal_channel();
        drop(rx);
        tx.propose(BlendProposal {
            source_id: BranchId::new("branch_a"),
            target_id: BranchId::new("branch_b"),
        });
    }
}
