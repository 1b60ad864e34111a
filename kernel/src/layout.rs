//! Tree layout - deterministic seed positions for the branch tree.
//!
//! Breadth-first from the root, one row per depth. Each row is centered on
//! the same vertical axis, then everything is translated so the root lands on
//! the configured anchor. Only used to place branches that have no position.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::{Branch, BranchId, Position};
use crate::infrastructure::config::LayoutSettings;

/// Computes a position for every branch reachable from `root_id`.
///
/// Children are visited in iteration order of `branches`. The root is always
/// placed on the anchor, even when it is not among `branches`. Unreachable
/// branches get no entry.
pub fn compute_tree_layout<'a, I>(
    branches: I,
    root_id: &BranchId,
    settings: &LayoutSettings,
) -> HashMap<BranchId, Position>
where
    I: IntoIterator<Item = &'a Branch>,
{
    let mut children: HashMap<&BranchId, Vec<&BranchId>> = HashMap::new();
    for branch in branches {
        if let Some(parent) = branch.parent_id() {
            children.entry(parent).or_default().push(branch.id());
        }
    }

    let levels = group_by_depth(&children, root_id);
    let anchor = settings.anchor();
    let mut positions = HashMap::new();

    for (depth, level) in levels.iter().enumerate() {
        let width = level.len() as f64 * settings.horizontal_unit;
        let y = anchor.y + depth as f64 * settings.vertical_unit;
        for (index, id) in level.iter().enumerate() {
            let x = -width / 2.0
                + index as f64 * settings.horizontal_unit
                + settings.horizontal_unit / 2.0;
            positions.insert((*id).clone(), Position::new(anchor.x + x, y));
        }
    }
    positions
}

fn group_by_depth<'a>(
    children: &HashMap<&'a BranchId, Vec<&'a BranchId>>,
    root_id: &'a BranchId,
) -> Vec<Vec<&'a BranchId>> {
    let mut levels: Vec<Vec<&BranchId>> = Vec::new();
    let mut seen = HashSet::from([root_id]);
    let mut queue = VecDeque::from([(root_id, 0usize)]);

    while let Some((id, depth)) = queue.pop_front() {
        if levels.len() <= depth {
            levels.push(Vec::new());
        }
        levels[depth].push(id);

        for &child in children.get(id).into_iter().flatten() {
            if seen.insert(child) {
                queue.push_back((child, depth + 1));
            }
        }
    }
    levels
}
