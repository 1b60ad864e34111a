//! Domain layer - Core types and business rules
//!
//! Projects own a tree of branches; branches own append-only checkpoint and
//! comment histories. All changes to a branch go through `BranchMutation`.

pub mod color;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod mutation;
pub mod status;

pub use color::{branch_color, ACCENT_PALETTE};
pub use entities::{
    display_name, ArtifactSnapshot, Branch, Checkpoint, Collaborator, Comment, Position, Project,
    MAX_BRANCH_NAME_LEN, MAX_DESCRIPTION_LEN, MIN_BRANCH_NAME_LEN,
};
pub use errors::{BranchValidationError, ParseStatusError};
pub use ids::{BranchId, CheckpointId, CollaboratorId, CommentId, ProjectId};
pub use mutation::{BranchMutation, MutationKind};
pub use status::BranchStatus;
