//! Branch graph store - the single source of truth for one loaded project.
//!
//! Mutations are synchronous and take `&mut self`. Lookups of unknown ids are
//! silent no-ops; every successful change publishes one `StoreEvent`.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    Branch, BranchId, BranchMutation, BranchValidationError, Collaborator, Comment, Position,
    Project, ProjectId,
};
use crate::infrastructure::config::LayoutSettings;
use crate::layout::compute_tree_layout;

use super::events::{EventBus, EventReceiver, StoreEvent};
use super::index::BranchArena;

/// Errors raised by the branch graph store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The project's root branch id names no branch.
    #[error("Root branch {0} is not part of the project")]
    MissingRoot(BranchId),
    /// The root branch has a parent.
    #[error("Root branch {0} must not have a parent")]
    RootHasParent(BranchId),
    /// A branch other than the root has no parent.
    #[error("Branch {0} has no parent but is not the root")]
    MultipleRoots(BranchId),
    /// Two branches share an id.
    #[error("Duplicate branch id {0}")]
    DuplicateBranch(BranchId),
    /// Parent links loop back on themselves.
    #[error("Parent links form a cycle through {0}")]
    CycleDetected(BranchId),
    /// The root branch cannot be deleted.
    #[error("Root branch {0} cannot be deleted")]
    RootProtected(BranchId),
    /// A branch change failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] BranchValidationError),
}

/// Snapshots of both branches of a blend, taken before they were retired.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The dragged branch.
    pub source: Branch,
    /// The branch it was dropped onto.
    pub target: Branch,
}

#[derive(Debug, Clone)]
struct ProjectMeta {
    id: ProjectId,
    name: String,
    description: String,
    root_branch_id: BranchId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// In-memory branch tree of one project.
#[derive(Debug)]
pub struct BranchGraphStore {
    meta: ProjectMeta,
    arena: BranchArena,
    events: EventBus,
}

impl BranchGraphStore {
    /// Builds a store from a loaded project.
    ///
    /// Branch positions are kept as loaded; call [`Self::seed_positions`] to
    /// fill the missing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the project violates the tree invariants: the root
    /// is missing or has a parent, another branch is parentless, ids repeat,
    /// or parent links form a cycle. Parents that name no branch are accepted
    /// and logged.
    #[instrument(skip_all, fields(project_id = %project.id))]
    pub fn load(project: Project) -> Result<Self, StoreError> {
        let Project {
            id,
            name,
            description,
            root_branch_id,
            created_at,
            updated_at,
            branches,
        } = project;

        let mut arena = BranchArena::new();
        for branch in branches {
            if branch.is_root() && branch.id() != &root_branch_id {
                return Err(StoreError::MultipleRoots(branch.id().clone()));
            }
            if arena.contains(branch.id()) {
                return Err(StoreError::DuplicateBranch(branch.id().clone()));
            }
            arena.insert(branch);
        }

        let root = arena
            .get(&root_branch_id)
            .ok_or_else(|| StoreError::MissingRoot(root_branch_id.clone()))?;
        if !root.is_root() {
            return Err(StoreError::RootHasParent(root_branch_id));
        }
        check_parent_links(&arena)?;

        let events = EventBus::new();
        let branch_count = arena.len();
        gauge!("sprig_branches").set(branch_count as f64);
        info!(branch_count, "Project loaded");
        events.publish(StoreEvent::ProjectLoaded {
            project_id: id.clone(),
            branch_count,
        });

        Ok(Self {
            meta: ProjectMeta {
                id,
                name,
                description,
                root_branch_id,
                created_at,
                updated_at,
            },
            arena,
            events,
        })
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Returns the project id.
    #[must_use]
    pub fn project_id(&self) -> &ProjectId {
        &self.meta.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.meta.name
    }

    /// Returns the root branch id.
    #[must_use]
    pub fn root_branch_id(&self) -> &BranchId {
        &self.meta.root_branch_id
    }

    /// Returns the time of the last change to the tree.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at
    }

    /// Iterates branches in creation order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.arena.iter()
    }

    /// Number of branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false for a loaded project; the root cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Creates a child of `parent_id`.
    ///
    /// The child starts from a copy of the parent's latest checkpoint and
    /// inherits the parent's first collaborator. Its position is left unset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the name or description is out of range.
    #[instrument(skip_all, fields(parent_id = %parent_id))]
    pub fn create_branch(
        &mut self,
        parent_id: &BranchId,
        name: &str,
        description: &str,
    ) -> Result<Branch, StoreError> {
        let now = Utc::now();
        let id = BranchId::generate();
        let mut branch = Branch::new(id.clone(), Some(parent_id.clone()), name, description, now)?;

        if let Some(parent) = self.arena.get(parent_id) {
            if let Some(latest) = parent.latest_checkpoint() {
                let label = format!("Branched off from {}", parent.name());
                branch = branch.with_checkpoint(latest.fork_for(id.clone(), label));
            }
            if let Some(owner) = parent.collaborators().first() {
                branch = branch.with_collaborators(vec![owner.clone()]);
            }
        } else {
            warn!(branch_id = %id, "Creating branch under a parent that does not exist");
        }

        self.arena.insert(branch.clone());
        self.meta.updated_at = now;

        counter!("sprig_branches_created_total").increment(1);
        gauge!("sprig_branches").set(self.arena.len() as f64);
        info!(branch_id = %id, name = branch.name(), "Branch created");
        self.events.publish(StoreEvent::BranchCreated {
            branch_id: id,
            parent_id: parent_id.clone(),
        });
        Ok(branch)
    }

    /// Applies one typed mutation to a branch.
    ///
    /// Returns the updated branch, or `None` if `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the mutation is rejected; the
    /// branch is left unchanged.
    #[instrument(skip_all, fields(branch_id = %id, mutation = ?mutation.kind()))]
    pub fn update_branch(
        &mut self,
        id: &BranchId,
        mutation: BranchMutation,
    ) -> Result<Option<Branch>, StoreError> {
        let kind = mutation.kind();
        let Some(branch) = self.arena.get_mut(id) else {
            debug!("Update ignored, unknown branch");
            return Ok(None);
        };

        let now = Utc::now();
        mutation.apply(branch, now)?;
        let updated = branch.clone();
        self.meta.updated_at = now;

        debug!("Branch updated");
        self.events.publish(StoreEvent::BranchUpdated {
            branch_id: id.clone(),
            mutation: kind,
        });
        Ok(Some(updated))
    }

    /// Removes a branch and its whole subtree.
    ///
    /// Returns the removed ids, `id` first; empty if `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RootProtected` for the root branch.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub fn delete_branch(&mut self, id: &BranchId) -> Result<Vec<BranchId>, StoreError> {
        if *id == self.meta.root_branch_id {
            return Err(StoreError::RootProtected(id.clone()));
        }

        let removed = self.arena.remove_subtree(id);
        if removed.is_empty() {
            debug!("Delete ignored, unknown branch");
            return Ok(removed);
        }
        self.meta.updated_at = Utc::now();

        counter!("sprig_branches_deleted_total").increment(removed.len() as u64);
        gauge!("sprig_branches").set(self.arena.len() as f64);
        info!(removed = removed.len(), "Branch subtree deleted");
        self.events.publish(StoreEvent::BranchesDeleted {
            branch_ids: removed.clone(),
        });
        Ok(removed)
    }

    /// Blends `source_id` into `target_id`, retiring both.
    ///
    /// Both branches become `merged` and the source records the target in
    /// `merged_into`. Returns their states from before the blend, or `None`
    /// (with no change) if either id is unknown.
    #[instrument(skip(self), fields(source_id = %source_id, target_id = %target_id))]
    pub fn merge_branches(
        &mut self,
        source_id: &BranchId,
        target_id: &BranchId,
    ) -> Option<MergeOutcome> {
        let source = self.arena.get(source_id)?.clone();
        let target = self.arena.get(target_id)?.clone();

        let now = Utc::now();
        if let Some(branch) = self.arena.get_mut(target_id) {
            branch.mark_merged(None);
            branch.touch(now);
        }
        let lineage = (source_id != target_id).then(|| target_id.clone());
        if let Some(branch) = self.arena.get_mut(source_id) {
            branch.mark_merged(lineage);
            branch.touch(now);
        }
        self.meta.updated_at = now;

        counter!("sprig_branches_merged_total").increment(1);
        info!("Branches merged");
        self.events.publish(StoreEvent::BranchesMerged {
            source_id: source_id.clone(),
            target_id: target_id.clone(),
        });
        Some(MergeOutcome { source, target })
    }

    /// Appends a comment to a branch.
    ///
    /// Returns `None` if the branch is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the trimmed content is empty.
    #[instrument(skip(self, content, author), fields(branch_id = %branch_id))]
    pub fn add_comment(
        &mut self,
        branch_id: &BranchId,
        content: &str,
        author: Collaborator,
    ) -> Result<Option<Comment>, StoreError> {
        let Some(branch) = self.arena.get_mut(branch_id) else {
            debug!("Comment ignored, unknown branch");
            return Ok(None);
        };

        let comment = Comment::compose(branch_id.clone(), author, content);
        BranchMutation::AppendComment(comment.clone()).apply(branch, comment.timestamp())?;
        self.meta.updated_at = comment.timestamp();

        info!(
            comment_id = %comment.id(),
            author = %comment.author().name,
            "Comment added"
        );
        self.events.publish(StoreEvent::CommentAdded {
            branch_id: branch_id.clone(),
            comment_id: comment.id().clone(),
        });
        Ok(Some(comment))
    }

    /// Returns a branch by id.
    #[must_use]
    pub fn get_branch_by_id(&self, id: &BranchId) -> Option<&Branch> {
        self.arena.get(id)
    }

    /// Returns the direct children of `parent_id` in creation order.
    #[must_use]
    pub fn get_child_branches(&self, parent_id: &BranchId) -> Vec<&Branch> {
        self.arena
            .child_ids(parent_id)
            .iter()
            .filter_map(|id| self.arena.get(id))
            .collect()
    }

    /// Returns the path `[root, ..., id]`.
    ///
    /// If a parent link is broken the chain starts at the topmost branch
    /// found. Empty if `id` is unknown.
    #[must_use]
    pub fn get_ancestor_chain(&self, id: &BranchId) -> Vec<&Branch> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.arena.get(id);

        while let Some(branch) = current {
            if !seen.insert(branch.id()) {
                warn!(branch_id = %branch.id(), "Parent cycle while walking ancestors");
                break;
            }
            chain.push(branch);
            current = branch.parent_id().and_then(|parent| self.arena.get(parent));
        }

        chain.reverse();
        chain
    }

    /// Returns every descendant of `id` in breadth-first order.
    #[must_use]
    pub fn descendants(&self, id: &BranchId) -> Vec<&Branch> {
        self.arena
            .descendant_ids(id)
            .iter()
            .filter_map(|id| self.arena.get(id))
            .collect()
    }

    /// Returns the depth of every branch reachable from the root (root = 0).
    #[must_use]
    pub fn depth_map(&self) -> HashMap<BranchId, usize> {
        let root = self.meta.root_branch_id.clone();
        let mut depths = HashMap::from([(root.clone(), 0)]);
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            let depth = depths.get(&current).copied().unwrap_or_default();
            for child in self.arena.child_ids(&current) {
                if !depths.contains_key(child) {
                    depths.insert(child.clone(), depth + 1);
                    queue.push_back(child.clone());
                }
            }
        }
        depths
    }

    /// Gives every unpositioned branch its tree layout position.
    ///
    /// Existing positions are never overwritten. Branches not reachable from
    /// the root are placed at the origin. Returns the number of branches seeded.
    #[instrument(skip_all)]
    pub fn seed_positions(&mut self, layout: &LayoutSettings) -> usize {
        let missing: Vec<BranchId> = self
            .arena
            .iter()
            .filter(|branch| branch.position().is_none())
            .map(|branch| branch.id().clone())
            .collect();
        if missing.is_empty() {
            return 0;
        }

        let seeds = compute_tree_layout(self.arena.iter(), &self.meta.root_branch_id, layout);
        for id in &missing {
            let position = seeds.get(id).copied().unwrap_or(Position::ORIGIN);
            if let Some(branch) = self.arena.get_mut(id) {
                branch.set_position(position);
            }
        }

        let count = missing.len();
        debug!(count, "Positions seeded");
        self.events.publish(StoreEvent::PositionsSeeded { count });
        count
    }

    /// Exports the current state as a project.
    #[must_use]
    pub fn to_project(&self) -> Project {
        Project {
            id: self.meta.id.clone(),
            name: self.meta.name.clone(),
            description: self.meta.description.clone(),
            root_branch_id: self.meta.root_branch_id.clone(),
            created_at: self.meta.created_at,
            updated_at: self.meta.updated_at,
            branches: self.arena.iter().cloned().collect(),
        }
    }
}

fn check_parent_links(arena: &BranchArena) -> Result<(), StoreError> {
    let mut settled: HashSet<&BranchId> = HashSet::new();

    for branch in arena.iter() {
        let mut path: Vec<&BranchId> = Vec::new();
        let mut current = Some(branch);

        while let Some(node) = current {
            if settled.contains(node.id()) {
                break;
            }
            if path.contains(&node.id()) {
                return Err(StoreError::CycleDetected(node.id().clone()));
            }
            path.push(node.id());

            current = node.parent_id().and_then(|parent| {
                let found = arena.get(parent);
                if found.is_none() {
                    warn!(branch_id = %node.id(), parent_id = %parent, "Branch references a missing parent");
                }
                found
            });
        }
        settled.extend(path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtifactSnapshot, BranchStatus, Checkpoint};

    fn branch(id: &str, parent: Option<&str>) -> Branch {
        Branch::new(BranchId::new(id), parent.map(BranchId::new), id, "", Utc::now()).unwrap()
    }

    fn project(branches: Vec<Branch>) -> Project {
        let mut project = Project::new(
            "proj_test",
            "Test",
            "",
            BranchId::new("r"),
            Utc::now(),
        );
        project.branches = branches;
        project
    }

    fn alice() -> Collaborator {
        Collaborator::new("user_alice", "Alice Kim", "", "#8B5CF6")
    }

    fn store() -> BranchGraphStore {
        let root = branch("r", None)
            .with_collaborators(vec![alice()])
            .with_checkpoint(Checkpoint::capture(
                BranchId::new("r"),
                "Initial",
                ArtifactSnapshot::new("<main/>"),
            ));
        BranchGraphStore::load(project(vec![root])).unwrap()
    }

    #[test]
    fn load_rejects_broken_trees() {
        assert_eq!(
            BranchGraphStore::load(project(vec![branch("a", None)])).unwrap_err(),
            StoreError::MultipleRoots(BranchId::new("a"))
        );
        assert_eq!(
            BranchGraphStore::load(project(vec![])).unwrap_err(),
            StoreError::MissingRoot(BranchId::new("r"))
        );
        assert_eq!(
            BranchGraphStore::load(project(vec![branch("r", Some("x")), branch("x", Some("r"))]))
                .unwrap_err(),
            StoreError::RootHasParent(BranchId::new("r"))
        );
        assert_eq!(
            BranchGraphStore::load(project(vec![branch("r", None), branch("r", None)]))
                .unwrap_err(),
            StoreError::DuplicateBranch(BranchId::new("r"))
        );
    }

    #[test]
    fn load_rejects_cycles_but_accepts_dangling_parents() {
        let cyclic = project(vec![
            branch("r", None),
            branch("a", Some("b")),
            branch("b", Some("a")),
        ]);
        assert!(matches!(
            BranchGraphStore::load(cyclic),
            Err(StoreError::CycleDetected(_))
        ));

        let dangling = project(vec![branch("r", None), branch("orphan", Some("ghost"))]);
        let store = BranchGraphStore::load(dangling).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_branch_forks_latest_checkpoint() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let child = store.create_branch(&root_id, "hero-redesign", "").unwrap();

        assert_eq!(child.parent_id(), Some(&root_id));
        assert_eq!(child.status(), BranchStatus::Active);
        assert!(child.position().is_none());
        assert_eq!(child.checkpoints().len(), 1);

        let fork = &child.checkpoints()[0];
        let original = store.get_branch_by_id(&root_id).unwrap().latest_checkpoint().unwrap();
        assert_ne!(fork.id(), original.id());
        assert_eq!(fork.branch_id(), child.id());
        assert_eq!(fork.snapshot(), original.snapshot());
        assert_eq!(fork.label(), "Branched off from r");
        assert_eq!(child.collaborators(), [alice()]);
    }

    #[test]
    fn create_branch_validates_name_and_accepts_dangling_parent() {
        let mut store = store();
        assert!(matches!(
            store.create_branch(&BranchId::new("r"), "  ", ""),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.len(), 1);

        let orphan = store.create_branch(&BranchId::new("ghost"), "orphan", "").unwrap();
        assert!(orphan.checkpoints().is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn children_are_in_creation_order() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let a = store.create_branch(&root_id, "a", "").unwrap();
        let b = store.create_branch(&root_id, "b", "").unwrap();

        let children: Vec<_> = store
            .get_child_branches(&root_id)
            .into_iter()
            .map(|branch| branch.id().clone())
            .collect();
        assert_eq!(children, [a.id().clone(), b.id().clone()]);

        let chain: Vec<_> = store
            .get_ancestor_chain(a.id())
            .into_iter()
            .map(|branch| branch.id().clone())
            .collect();
        assert_eq!(chain, [root_id, a.id().clone()]);
    }

    #[test]
    fn update_unknown_branch_is_noop() {
        let mut store = store();
        let result = store
            .update_branch(&BranchId::new("nope"), BranchMutation::Rename("x".into()))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rejected_update_leaves_branch_unchanged() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let before = store.get_branch_by_id(&root_id).unwrap().clone();
        assert!(store
            .update_branch(&root_id, BranchMutation::Rename(String::new()))
            .is_err());
        assert_eq!(store.get_branch_by_id(&root_id), Some(&before));
    }

    #[test]
    fn delete_removes_subtree_and_protects_root() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let a = store.create_branch(&root_id, "a", "").unwrap();
        let a1 = store.create_branch(a.id(), "a1", "").unwrap();
        let b = store.create_branch(&root_id, "b", "").unwrap();

        assert_eq!(
            store.delete_branch(&root_id),
            Err(StoreError::RootProtected(root_id.clone()))
        );

        let removed = store.delete_branch(a.id()).unwrap();
        assert_eq!(removed, [a.id().clone(), a1.id().clone()]);
        assert!(store.get_branch_by_id(a1.id()).is_none());
        assert!(store.get_branch_by_id(b.id()).is_some());
        assert!(store.delete_branch(a.id()).unwrap().is_empty());
    }

    #[test]
    fn merge_retires_both_and_records_lineage() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let a = store.create_branch(&root_id, "a", "").unwrap();
        let b = store.create_branch(&root_id, "b", "").unwrap();

        let outcome = store.merge_branches(a.id(), b.id()).unwrap();
        assert_eq!(outcome.source.status(), BranchStatus::Active);
        assert_eq!(outcome.target.status(), BranchStatus::Active);

        let source = store.get_branch_by_id(a.id()).unwrap();
        assert_eq!(source.status(), BranchStatus::Merged);
        assert_eq!(source.merged_into(), Some(b.id()));
        let target = store.get_branch_by_id(b.id()).unwrap();
        assert_eq!(target.status(), BranchStatus::Merged);
        assert!(target.merged_into().is_none());
        assert_eq!(
            store.get_branch_by_id(&root_id).unwrap().status(),
            BranchStatus::Active
        );
    }

    #[test]
    fn merge_with_unknown_id_changes_nothing() {
        let mut store = store();
        let root_id = BranchId::new("r");
        assert!(store.merge_branches(&root_id, &BranchId::new("nope")).is_none());
        assert_eq!(
            store.get_branch_by_id(&root_id).unwrap().status(),
            BranchStatus::Active
        );
    }

    #[test]
    fn add_comment_trims_and_rejects_blank() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let comment = store
            .add_comment(&root_id, "  Looks great  ", alice())
            .unwrap()
            .unwrap();
        assert_eq!(comment.content(), "Looks great");
        assert_eq!(comment.author(), &alice());
        assert_eq!(store.get_branch_by_id(&root_id).unwrap().comments().len(), 1);

        assert!(store.add_comment(&root_id, "   ", alice()).is_err());
        assert!(store
            .add_comment(&BranchId::new("nope"), "hi", alice())
            .unwrap()
            .is_none());
    }

    #[test]
    fn depth_map_and_descendants() {
        let mut store = store();
        let root_id = BranchId::new("r");
        let a = store.create_branch(&root_id, "a", "").unwrap();
        let a1 = store.create_branch(a.id(), "a1", "").unwrap();

        let depths = store.depth_map();
        assert_eq!(depths[&root_id], 0);
        assert_eq!(depths[a1.id()], 2);

        let below: Vec<_> = store.descendants(&root_id).iter().map(|b| b.id().clone()).collect();
        assert_eq!(below, [a.id().clone(), a1.id().clone()]);
    }

    #[test]
    fn seed_positions_keeps_existing_positions() {
        let root = branch("r", None).with_position(Position::new(1.0, 2.0));
        let mut store = BranchGraphStore::load(project(vec![
            root,
            branch("a", Some("r")),
            branch("orphan", Some("ghost")),
        ]))
        .unwrap();

        let seeded = store.seed_positions(&LayoutSettings::default());
        assert_eq!(seeded, 2);
        assert_eq!(
            store.get_branch_by_id(&BranchId::new("r")).unwrap().position(),
            Some(Position::new(1.0, 2.0))
        );
        assert_eq!(
            store.get_branch_by_id(&BranchId::new("a")).unwrap().position(),
            Some(Position::new(400.0, 320.0))
        );
        assert_eq!(
            store.get_branch_by_id(&BranchId::new("orphan")).unwrap().position(),
            Some(Position::ORIGIN)
        );
        assert_eq!(store.seed_positions(&LayoutSettings::default()), 0);
    }

    #[test]
    fn mutations_publish_events() {
        let mut store = store();
        let mut rx = store.subscribe();
        let root_id = BranchId::new("r");
        let child = store.create_branch(&root_id, "a", "").unwrap();
        store
            .update_branch(child.id(), BranchMutation::Reposition(Position::new(5.0, 5.0)))
            .unwrap();
        store.delete_branch(child.id()).unwrap();

        let events = rx.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], StoreEvent::BranchCreated { .. }));
        assert!(matches!(
            events[1],
            StoreEvent::BranchUpdated {
                mutation: crate::domain::MutationKind::Reposition,
                ..
            }
        ));
        assert!(matches!(events[2], StoreEvent::BranchesDeleted { .. }));
    }
}
