//! Domain identifiers - Newtype wrappers for type safety
//!
//! Identifiers are short prefixed strings (`branch_3f9a2c1d`, `ckpt_81be04`)
//! so they stay readable on the canvas and hash to a stable accent color.
//! Each kind gets its own type to prevent mixing up ids at compile time.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Returns the first `len` hex characters of a fresh v4 UUID.
fn random_suffix(len: usize) -> String {
    let mut suffix = uuid::Uuid::new_v4().simple().to_string();
    suffix.truncate(len);
    suffix
}

macro_rules! prefixed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $len:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix carried by generated identifiers of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Wraps an existing identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh identifier with a random suffix.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}{}", Self::PREFIX, random_suffix($len)))
            }

            /// Returns the inner string reference.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

prefixed_id!(
    /// Unique identifier for a project.
    ProjectId,
    "proj_",
    8
);

prefixed_id!(
    /// Unique identifier for a branch in the version tree.
    BranchId,
    "branch_",
    8
);

prefixed_id!(
    /// Unique identifier for a checkpoint within a branch history.
    CheckpointId,
    "ckpt_",
    6
);

prefixed_id!(
    /// Unique identifier for a comment.
    CommentId,
    "cmt_",
    8
);

prefixed_id!(
    /// Identifier of a collaborator (user) referenced by branches and comments.
    CollaboratorId,
    "user_",
    8
);
