//! Node footprint geometry.

use crate::domain::{Branch, BranchId, Position};
use crate::infrastructure::config::{BlendTargetPolicy, CanvasSettings};

/// Center of a node whose top-left corner is at `position`.
#[must_use]
pub fn node_center(position: Position, settings: &CanvasSettings) -> Position {
    position.offset(settings.node_width / 2.0, settings.node_height / 2.0)
}

/// Finds the node a dragged card at `position` overlaps, if any.
///
/// Every positioned branch except `dragged` is a candidate. A candidate
/// overlaps when the distance between centers is below the blend threshold.
/// This is a linear scan on every call.
pub fn find_blend_target<'a, I>(
    branches: I,
    dragged: &BranchId,
    position: Position,
    settings: &CanvasSettings,
) -> Option<BranchId>
where
    I: IntoIterator<Item = &'a Branch>,
{
    let threshold = settings.blend_threshold();
    let center = node_center(position, settings);

    let mut overlapping = branches.into_iter().filter_map(|branch| {
        if branch.id() == dragged {
            return None;
        }
        let distance = center.distance_to(node_center(branch.position()?, settings));
        (distance < threshold).then_some((branch, distance))
    });

    let found = match settings.blend_target_policy {
        BlendTargetPolicy::FirstFound => overlapping.next(),
        BlendTargetPolicy::Nearest => overlapping.min_by(|a, b| a.1.total_cmp(&b.1)),
    };
    found.map(|(branch, _)| branch.id().clone())
}
