//! Branch domain - Project, branch, checkpoint and comment entities
//!
//! Fields are private; checkpoint and comment histories are append-only and
//! only grow through validated `BranchMutation`s applied by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::color::branch_color;
use super::errors::BranchValidationError;
use super::ids::{BranchId, CheckpointId, CollaboratorId, CommentId, ProjectId};
use super::status::BranchStatus;

/// Minimum branch name length, after trimming.
pub const MIN_BRANCH_NAME_LEN: usize = 1;
/// Maximum branch name length, after trimming.
pub const MAX_BRANCH_NAME_LEN: usize = 64;
/// Maximum branch description length.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A point on the canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// The canvas origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns the position shifted by the given offsets.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Checks that both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A team member referenced by branches and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Collaborator identifier.
    pub id: CollaboratorId,
    /// Display name.
    pub name: String,
    /// Avatar image reference.
    pub avatar_url: String,
    /// Accent color.
    pub color: String,
}

impl Collaborator {
    /// Creates a collaborator reference.
    #[must_use]
    pub fn new(
        id: impl Into<CollaboratorId>,
        name: impl Into<String>,
        avatar_url: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar_url: avatar_url.into(),
            color: color.into(),
        }
    }
}

/// Rendered artifact captured by a checkpoint. Opaque to the graph engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactSnapshot {
    /// Rendered document source.
    pub code: String,
    /// Optional thumbnail reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl ArtifactSnapshot {
    /// Creates a snapshot without a thumbnail.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            thumbnail_url: None,
        }
    }
}

/// An immutable snapshot of the artifact at one point in a branch history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    id: CheckpointId,
    branch_id: BranchId,
    label: String,
    timestamp: DateTime<Utc>,
    snapshot: ArtifactSnapshot,
}

impl Checkpoint {
    /// Creates a checkpoint with explicit identity and time.
    #[must_use]
    pub fn new(
        id: CheckpointId,
        branch_id: BranchId,
        label: impl Into<String>,
        timestamp: DateTime<Utc>,
        snapshot: ArtifactSnapshot,
    ) -> Self {
        Self {
            id,
            branch_id,
            label: label.into(),
            timestamp,
            snapshot,
        }
    }

    /// Captures a new checkpoint for `branch_id` with a fresh id, stamped now.
    #[must_use]
    pub fn capture(branch_id: BranchId, label: impl Into<String>, snapshot: ArtifactSnapshot) -> Self {
        Self::new(CheckpointId::generate(), branch_id, label, Utc::now(), snapshot)
    }

    /// Copies this checkpoint under a new id for another branch.
    #[must_use]
    pub(crate) fn fork_for(&self, branch_id: BranchId, label: impl Into<String>) -> Self {
        Self::new(
            CheckpointId::generate(),
            branch_id,
            label,
            Utc::now(),
            self.snapshot.clone(),
        )
    }

    /// Returns the checkpoint id.
    #[must_use]
    pub fn id(&self) -> &CheckpointId {
        &self.id
    }

    /// Returns the owning branch id.
    #[must_use]
    pub fn branch_id(&self) -> &BranchId {
        &self.branch_id
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the capture time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the captured artifact.
    #[must_use]
    pub fn snapshot(&self) -> &ArtifactSnapshot {
        &self.snapshot
    }
}

/// A comment attached to a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    branch_id: BranchId,
    author: Collaborator,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment with explicit identity and time.
    #[must_use]
    pub fn new(
        id: CommentId,
        branch_id: BranchId,
        author: Collaborator,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            branch_id,
            author,
            content: content.into(),
            timestamp,
        }
    }

    /// Composes a new comment with a fresh id, trimmed content, stamped now.
    #[must_use]
    pub fn compose(branch_id: BranchId, author: Collaborator, content: &str) -> Self {
        Self::new(
            CommentId::generate(),
            branch_id,
            author,
            content.trim(),
            Utc::now(),
        )
    }

    /// Returns the comment id.
    #[must_use]
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the owning branch id.
    #[must_use]
    pub fn branch_id(&self) -> &BranchId {
        &self.branch_id
    }

    /// Returns the author.
    #[must_use]
    pub fn author(&self) -> &Collaborator {
        &self.author
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A named lineage node in the version tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    id: BranchId,
    name: String,
    description: String,
    parent_id: Option<BranchId>,
    status: BranchStatus,
    color: String,
    position: Option<Position>,
    checkpoints: Vec<Checkpoint>,
    comments: Vec<Comment>,
    collaborators: Vec<Collaborator>,
    tags: Vec<String>,
    merged_into: Option<BranchId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Branch {
    /// Creates an active branch with the color derived from its id.
    ///
    /// # Errors
    /// Returns `BranchValidationError` if the trimmed name or description is out of range.
    pub fn new(
        id: BranchId,
        parent_id: Option<BranchId>,
        name: &str,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BranchValidationError> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        let color = branch_color(&id).to_string();

        Ok(Self {
            id,
            name,
            description,
            parent_id,
            status: BranchStatus::Active,
            color,
            position: None,
            checkpoints: Vec::new(),
            comments: Vec::new(),
            collaborators: Vec::new(),
            tags: Vec::new(),
            merged_into: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: BranchStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Appends a checkpoint to the initial history.
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoints.push(checkpoint);
        self
    }

    /// Appends a comment to the initial thread.
    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Sets the collaborators.
    #[must_use]
    pub fn with_collaborators(mut self, collaborators: Vec<Collaborator>) -> Self {
        self.collaborators = collaborators;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the last-update time.
    #[must_use]
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Returns the branch id.
    #[must_use]
    pub fn id(&self) -> &BranchId {
        &self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parent branch id; `None` only for the root.
    #[must_use]
    pub fn parent_id(&self) -> Option<&BranchId> {
        self.parent_id.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BranchStatus {
        self.status
    }

    /// Returns the accent color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the canvas position, if one has been assigned.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns the checkpoint history, oldest first.
    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Returns the current (latest) checkpoint.
    #[must_use]
    pub fn latest_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Returns the comment thread, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the collaborators.
    #[must_use]
    pub fn collaborators(&self) -> &[Collaborator] {
        &self.collaborators
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the branch this one was blended into, if any.
    #[must_use]
    pub fn merged_into(&self) -> Option<&BranchId> {
        self.merged_into.as_ref()
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Checks if this branch has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_color(&mut self, color: String) {
        self.color = color;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    pub(crate) fn set_status(&mut self, status: BranchStatus) {
        self.status = status;
    }

    pub(crate) fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    pub(crate) fn push_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub(crate) fn mark_merged(&mut self, merged_into: Option<BranchId>) {
        self.status = BranchStatus::Merged;
        if merged_into.is_some() {
            self.merged_into = merged_into;
        }
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Trims and length-checks a branch name.
///
/// # Errors
/// Returns `BranchValidationError::InvalidNameLength` when out of range.
pub fn validate_name(name: &str) -> Result<String, BranchValidationError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if (MIN_BRANCH_NAME_LEN..=MAX_BRANCH_NAME_LEN).contains(&len) {
        Ok(trimmed.to_string())
    } else {
        Err(BranchValidationError::InvalidNameLength {
            len,
            min: MIN_BRANCH_NAME_LEN,
            max: MAX_BRANCH_NAME_LEN,
        })
    }
}

/// Trims and length-checks a branch description.
///
/// # Errors
/// Returns `BranchValidationError::DescriptionTooLong` when over the limit.
pub fn validate_description(description: &str) -> Result<String, BranchValidationError> {
    let trimmed = description.trim();
    let len = trimmed.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(BranchValidationError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Turns a branch slug into a display label: `hero-redesign` becomes `Hero redesign`.
#[must_use]
pub fn display_name(slug: &str) -> String {
    let spaced = slug.replace('-', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// A project: the versioned artifact and its branch tree, as loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project id.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// The unique parentless branch.
    pub root_branch_id: BranchId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last-update time.
    pub updated_at: DateTime<Utc>,
    /// Branches in insertion order.
    pub branches: Vec<Branch>,
}

impl Project {
    /// Creates an empty project rooted at `root_branch_id`.
    #[must_use]
    pub fn new(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        description: impl Into<String>,
        root_branch_id: BranchId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            root_branch_id,
            created_at,
            updated_at: created_at,
            branches: Vec::new(),
        }
    }

    /// Appends a branch.
    #[must_use]
    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }
}
