//! Branch domain - Branch lifecycle status
//!
//! `Merged` is terminal: once a branch is blended it never becomes active again.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{BranchValidationError, ParseStatusError};

/// Branch lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    /// Branch is open for edits.
    #[default]
    Active,
    /// Branch is parked but kept on the canvas.
    Archived,
    /// Branch is part of an in-flight blend.
    Merging,
    /// Branch has been blended and is retired.
    Merged,
}

impl BranchStatus {
    /// Checks if this is a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Merged)
    }

    /// Checks if the branch still takes part in active work.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::Merging)
    }

    /// Validates that a transition from this status to the target is allowed.
    ///
    /// Re-asserting the current status is always accepted.
    ///
    /// # Errors
    /// Returns `BranchValidationError::InvalidStatusTransition` if the transition is invalid.
    pub fn validate_transition(self, target: Self) -> Result<(), BranchValidationError> {
        let valid = self == target
            || matches!(
                (self, target),
                (Self::Active, Self::Archived | Self::Merging)
                    | (Self::Archived, Self::Active)
                    | (Self::Merging, Self::Active | Self::Merged)
            );

        if valid {
            Ok(())
        } else {
            Err(BranchValidationError::InvalidStatusTransition {
                from: self,
                to: target,
            })
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Merging => "merging",
            Self::Merged => "merged",
        }
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "merging" => Ok(Self::Merging),
            "merged" => Ok(Self::Merged),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
