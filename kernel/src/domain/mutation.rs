//! Typed branch mutations.
//!
//! A branch is changed through exactly one `BranchMutation` at a time, each
//! with its own validation rule, so a drag that repositions a node can never
//! touch its status or history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::color::is_hex_color;
use super::entities::{validate_description, validate_name, Branch, Checkpoint, Comment, Position};
use super::errors::BranchValidationError;
use super::status::BranchStatus;

/// A single, validated change to one branch.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchMutation {
    /// Change the display name.
    Rename(String),
    /// Change the description.
    Describe(String),
    /// Override the derived accent color with a `#RRGGBB` value.
    Recolor(String),
    /// Move the node on the canvas.
    Reposition(Position),
    /// Append a checkpoint to the history.
    AppendCheckpoint(Checkpoint),
    /// Append a comment to the thread.
    AppendComment(Comment),
    /// Move the branch through its lifecycle.
    ChangeStatus(BranchStatus),
    /// Replace the tag list.
    SetTags(Vec<String>),
}

/// Discriminant of a `BranchMutation`, used in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// See `BranchMutation::Rename`.
    Rename,
    /// See `BranchMutation::Describe`.
    Describe,
    /// See `BranchMutation::Recolor`.
    Recolor,
    /// See `BranchMutation::Reposition`.
    Reposition,
    /// See `BranchMutation::AppendCheckpoint`.
    AppendCheckpoint,
    /// See `BranchMutation::AppendComment`.
    AppendComment,
    /// See `BranchMutation::ChangeStatus`.
    ChangeStatus,
    /// See `BranchMutation::SetTags`.
    SetTags,
}

impl BranchMutation {
    /// Returns the mutation kind.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::Rename(_) => MutationKind::Rename,
            Self::Describe(_) => MutationKind::Describe,
            Self::Recolor(_) => MutationKind::Recolor,
            Self::Reposition(_) => MutationKind::Reposition,
            Self::AppendCheckpoint(_) => MutationKind::AppendCheckpoint,
            Self::AppendComment(_) => MutationKind::AppendComment,
            Self::ChangeStatus(_) => MutationKind::ChangeStatus,
            Self::SetTags(_) => MutationKind::SetTags,
        }
    }

    /// Validates this mutation against the branch and applies it.
    ///
    /// The branch is left untouched when validation fails.
    ///
    /// # Errors
    /// Returns the `BranchValidationError` for the violated rule.
    pub fn apply(self, branch: &mut Branch, now: DateTime<Utc>) -> Result<(), BranchValidationError> {
        match self {
            Self::Rename(name) => branch.set_name(validate_name(&name)?),
            Self::Describe(description) => {
                branch.set_description(validate_description(&description)?);
            }
            Self::Recolor(color) => {
                if !is_hex_color(&color) {
                    return Err(BranchValidationError::InvalidColor(color));
                }
                branch.set_color(color);
            }
            Self::Reposition(position) => {
                if !position.is_finite() {
                    return Err(BranchValidationError::NonFinitePosition {
                        x: position.x,
                        y: position.y,
                    });
                }
                branch.set_position(position);
            }
            Self::AppendCheckpoint(checkpoint) => {
                validate_checkpoint(branch, &checkpoint)?;
                branch.push_checkpoint(checkpoint);
            }
            Self::AppendComment(comment) => {
                if comment.branch_id() != branch.id() {
                    return Err(BranchValidationError::CommentOwnerMismatch {
                        expected: branch.id().clone(),
                        found: comment.branch_id().clone(),
                    });
                }
                if comment.content().trim().is_empty() {
                    return Err(BranchValidationError::EmptyComment);
                }
                branch.push_comment(comment);
            }
            Self::ChangeStatus(status) => {
                branch.status().validate_transition(status)?;
                branch.set_status(status);
            }
            Self::SetTags(tags) => {
                let tags = tags
                    .iter()
                    .map(|tag| tag.trim())
                    .map(|tag| {
                        if tag.is_empty() {
                            Err(BranchValidationError::EmptyTag)
                        } else {
                            Ok(tag.to_string())
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                branch.set_tags(tags);
            }
        }
        branch.touch(now);
        Ok(())
    }
}

fn validate_checkpoint(branch: &Branch, checkpoint: &Checkpoint) -> Result<(), BranchValidationError> {
    if checkpoint.branch_id() != branch.id() {
        return Err(BranchValidationError::CheckpointOwnerMismatch {
            expected: branch.id().clone(),
            found: checkpoint.branch_id().clone(),
        });
    }
    if checkpoint.label().trim().is_empty() {
        return Err(BranchValidationError::EmptyCheckpointLabel);
    }
    if branch.checkpoints().iter().any(|c| c.id() == checkpoint.id()) {
        return Err(BranchValidationError::DuplicateCheckpoint(
            checkpoint.id().clone(),
        ));
    }
    if branch
        .latest_checkpoint()
        .is_some_and(|latest| checkpoint.timestamp() < latest.timestamp())
    {
        return Err(BranchValidationError::CheckpointOutOfOrder(
            checkpoint.id().clone(),
        ));
    }
    Ok(())
}
