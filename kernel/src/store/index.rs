//! Branch arena with a parent → children adjacency index.
//!
//! Branches live in an insertion-ordered map so iteration order equals
//! creation order; the adjacency index keeps child lists in the same order.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

use crate::domain::{Branch, BranchId};

/// Branch storage keyed by id, with subtree lookups in O(subtree).
#[derive(Debug, Clone, Default)]
pub struct BranchArena {
    branches: IndexMap<BranchId, Branch>,
    children: HashMap<BranchId, Vec<BranchId>>,
}

impl BranchArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a branch at the end of the iteration order.
    ///
    /// Returns the replaced branch when the id was already present; the
    /// replacement keeps its original slot.
    pub fn insert(&mut self, branch: Branch) -> Option<Branch> {
        let id = branch.id().clone();
        let parent = branch.parent_id().cloned();
        let previous = self.branches.insert(id.clone(), branch);

        if let Some(old_parent) = previous.as_ref().and_then(|b| b.parent_id().cloned()) {
            self.unlink(&old_parent, &id);
        }
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(id);
        }
        previous
    }

    /// Returns a branch by id.
    #[must_use]
    pub fn get(&self, id: &BranchId) -> Option<&Branch> {
        self.branches.get(id)
    }

    /// Returns a mutable branch by id.
    pub fn get_mut(&mut self, id: &BranchId) -> Option<&mut Branch> {
        self.branches.get_mut(id)
    }

    /// Checks if a branch exists.
    #[must_use]
    pub fn contains(&self, id: &BranchId) -> bool {
        self.branches.contains_key(id)
    }

    /// Returns the ids of a node's direct children, in creation order.
    #[must_use]
    pub fn child_ids(&self, parent: &BranchId) -> &[BranchId] {
        self.children.get(parent).map_or(&[], Vec::as_slice)
    }

    /// Returns every descendant id of `id` in breadth-first order, excluding `id`.
    #[must_use]
    pub fn descendant_ids(&self, id: &BranchId) -> Vec<BranchId> {
        let mut result = Vec::new();
        let mut seen = HashSet::from([id.clone()]);
        let mut queue = VecDeque::from([id.clone()]);

        while let Some(current) = queue.pop_front() {
            for child in self.child_ids(&current) {
                if seen.insert(child.clone()) {
                    result.push(child.clone());
                    queue.push_back(child.clone());
                }
            }
        }
        result
    }

    /// Removes `id` and its whole subtree; returns removed ids, `id` first.
    ///
    /// Returns an empty list if `id` is unknown.
    pub fn remove_subtree(&mut self, id: &BranchId) -> Vec<BranchId> {
        let Some(parent) = self.branches.get(id).map(|b| b.parent_id().cloned()) else {
            return Vec::new();
        };

        let mut removed = vec![id.clone()];
        removed.extend(self.descendant_ids(id));
        let doomed: HashSet<&BranchId> = removed.iter().collect();

        self.branches.retain(|branch_id, _| !doomed.contains(branch_id));
        for branch_id in &removed {
            self.children.remove(branch_id);
        }
        if let Some(parent) = parent {
            self.unlink(&parent, id);
        }
        removed
    }

    /// Iterates branches in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    /// Number of branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Checks if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    fn unlink(&mut self, parent: &BranchId, child: &BranchId) {
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|id| id != child);
            if siblings.is_empty() {
                self.children.remove(parent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn branch(id: &str, parent: Option<&str>) -> Branch {
        Branch::new(BranchId::new(id), parent.map(BranchId::new), id, "", Utc::now()).unwrap()
    }

    fn arena() -> BranchArena {
        let mut arena = BranchArena::new();
        for (id, parent) in [
            ("r", None),
            ("a", Some("r")),
            ("b", Some("r")),
            ("a1", Some("a")),
            ("a2", Some("a")),
            ("a1x", Some("a1")),
        ] {
            arena.insert(branch(id, parent));
        }
        arena
    }

    #[test]
    fn children_follow_insertion_order() {
        let arena = arena();
        assert_eq!(
            arena.child_ids(&BranchId::new("r")),
            [BranchId::new("a"), BranchId::new("b")]
        );
        assert!(arena.child_ids(&BranchId::new("b")).is_empty());
    }

    #[test]
    fn descendants_are_breadth_first() {
        let arena = arena();
        let ids: Vec<_> = arena
            .descendant_ids(&BranchId::new("a"))
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, ["a1", "a2", "a1x"]);
    }

    #[test]
    fn remove_subtree_takes_every_descendant() {
        let mut arena = arena();
        let removed = arena.remove_subtree(&BranchId::new("a"));
        assert_eq!(removed.len(), 4);
        assert_eq!(removed[0], BranchId::new("a"));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.child_ids(&BranchId::new("r")), [BranchId::new("b")]);
        assert!(!arena.contains(&BranchId::new("a1x")));
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut arena = arena();
        assert!(arena.remove_subtree(&BranchId::new("zzz")).is_empty());
        assert_eq!(arena.len(), 6);
    }

    #[test]
    fn dangling_parent_is_indexed() {
        let mut arena = arena();
        arena.insert(branch("orphan", Some("ghost")));
        assert_eq!(
            arena.child_ids(&BranchId::new("ghost")),
            [BranchId::new("orphan")]
        );
    }
}
