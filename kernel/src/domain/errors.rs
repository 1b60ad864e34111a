//! Domain errors - Error types for validation failures
//!
//! Every typed branch mutation has its own validation rule; a violated rule
//! surfaces as one `BranchValidationError` variant.

use super::ids::{BranchId, CheckpointId};
use super::status::BranchStatus;

/// Error type for branch validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BranchValidationError {
    /// Branch name is empty or too long after trimming.
    #[error("Branch name length {len} is outside valid range [{min}-{max}]")]
    InvalidNameLength {
        /// The actual length of the name.
        len: usize,
        /// The minimum allowed length.
        min: usize,
        /// The maximum allowed length.
        max: usize,
    },
    /// Description exceeds the maximum length.
    #[error("Branch description length {len} exceeds maximum {max}")]
    DescriptionTooLong {
        /// The actual length of the description.
        len: usize,
        /// The maximum allowed length.
        max: usize,
    },
    /// Color is not a `#RRGGBB` hex string.
    #[error("Invalid branch color '{0}', expected #RRGGBB")]
    InvalidColor(String),
    /// Position has a NaN or infinite coordinate.
    #[error("Position ({x}, {y}) is not finite")]
    NonFinitePosition {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Checkpoint label is empty.
    #[error("Checkpoint label cannot be empty")]
    EmptyCheckpointLabel,
    /// Checkpoint belongs to another branch.
    #[error("Checkpoint is owned by {found}, expected {expected}")]
    CheckpointOwnerMismatch {
        /// Branch the mutation targets.
        expected: BranchId,
        /// Branch recorded on the checkpoint.
        found: BranchId,
    },
    /// Checkpoint is older than the current latest checkpoint.
    #[error("Checkpoint {0} predates the branch's latest checkpoint")]
    CheckpointOutOfOrder(CheckpointId),
    /// Checkpoint id already present in the branch history.
    #[error("Checkpoint {0} already exists on this branch")]
    DuplicateCheckpoint(CheckpointId),
    /// Comment content is empty after trimming.
    #[error("Comment content cannot be empty")]
    EmptyComment,
    /// Comment belongs to another branch.
    #[error("Comment is owned by {found}, expected {expected}")]
    CommentOwnerMismatch {
        /// Branch the mutation targets.
        expected: BranchId,
        /// Branch recorded on the comment.
        found: BranchId,
    },
    /// Tag is empty after trimming.
    #[error("Tags cannot be empty")]
    EmptyTag,
    /// Cannot transition from current status.
    #[error("Cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: BranchStatus,
        /// The target status.
        to: BranchStatus,
    },
}

/// Error when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown branch status: '{0}'")]
pub struct ParseStatusError(pub String);
