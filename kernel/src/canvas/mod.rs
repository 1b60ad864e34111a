//! Canvas - drag gestures, blend detection, and the graph view model.

pub mod geometry;
pub mod interaction;
pub mod proposal;
pub mod view;

pub use geometry::{find_blend_target, node_center};
pub use interaction::{
    CanvasInteractionController, DragGesture, DragPhase, DropOutcome, InteractionError,
};
pub use proposal::{proposal_channel, BlendProposal, BlendProposalSink};
pub use view::{EdgeKind, GraphEdge, GraphNode, GraphView};
