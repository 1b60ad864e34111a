//! Graph view model - what a visualization layer draws.
//!
//! Nodes carry display data for each branch. Edges connect parent to child
//! and, for blended branches, the retired source to its target.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{BranchId, BranchStatus, Collaborator, Position, ACCENT_PALETTE};
use crate::infrastructure::config::LayoutSettings;
use crate::layout::compute_tree_layout;
use crate::store::BranchGraphStore;

const MISSING_PARENT_COLOR: &str = ACCENT_PALETTE[0];
const MISSING_MERGE_TARGET_COLOR: &str = ACCENT_PALETTE[2];

/// Display data for one branch card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Branch id.
    pub id: BranchId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: BranchStatus,
    /// Accent color.
    pub color: String,
    /// Rendered artifact of the latest checkpoint, empty without one.
    pub snapshot: String,
    /// Collaborators shown on the card.
    pub collaborators: Vec<Collaborator>,
    /// Number of checkpoints.
    pub checkpoint_count: usize,
    /// Number of comments.
    pub comment_count: usize,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Whether this is the project root.
    pub is_root: bool,
    /// Stored position, or the layout seed when none is stored.
    pub position: Position,
}

/// Kind of edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Parent to child.
    Lineage,
    /// Blended source to blend target.
    Merge,
}

/// A directed edge between two cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    /// Stable edge id.
    pub id: String,
    /// Edge kind.
    pub kind: EdgeKind,
    /// Start of the edge.
    pub source: BranchId,
    /// End of the edge.
    pub target: BranchId,
    /// Color at the start.
    pub source_color: String,
    /// Color at the end.
    pub target_color: String,
    /// Drawn highlighted; lineage edges into active or merging children.
    pub is_active: bool,
}

/// Nodes and edges of the whole branch tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    /// Branch cards, in creation order.
    pub nodes: Vec<GraphNode>,
    /// Lineage edges, then merge edges.
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// Builds the view from the current store state.
    #[must_use]
    pub fn build(store: &BranchGraphStore, layout: &LayoutSettings) -> Self {
        let seeds: HashMap<BranchId, Position> =
            if store.branches().any(|branch| branch.position().is_none()) {
                compute_tree_layout(store.branches(), store.root_branch_id(), layout)
            } else {
                HashMap::new()
            };
        let color_of = |id: &BranchId| store.get_branch_by_id(id).map(|b| b.color().to_string());

        let nodes = store
            .branches()
            .map(|branch| GraphNode {
                id: branch.id().clone(),
                name: branch.name().to_string(),
                description: branch.description().to_string(),
                status: branch.status(),
                color: branch.color().to_string(),
                snapshot: branch
                    .latest_checkpoint()
                    .map(|checkpoint| checkpoint.snapshot().code.clone())
                    .unwrap_or_default(),
                collaborators: branch.collaborators().to_vec(),
                checkpoint_count: branch.checkpoints().len(),
                comment_count: branch.comments().len(),
                updated_at: branch.updated_at(),
                is_root: branch.id() == store.root_branch_id(),
                position: branch
                    .position()
                    .or_else(|| seeds.get(branch.id()).copied())
                    .unwrap_or(Position::ORIGIN),
            })
            .collect();

        let lineage = store.branches().filter_map(|branch| {
            let parent_id = branch.parent_id()?;
            Some(GraphEdge {
                id: format!("edge_{parent_id}_{}", branch.id()),
                kind: EdgeKind::Lineage,
                source: parent_id.clone(),
                target: branch.id().clone(),
                source_color: color_of(parent_id)
                    .unwrap_or_else(|| MISSING_PARENT_COLOR.to_string()),
                target_color: branch.color().to_string(),
                is_active: branch.status().is_active(),
            })
        });

        let merges = store.branches().filter_map(|branch| {
            let target_id = branch.merged_into()?;
            if branch.status() != BranchStatus::Merged {
                return None;
            }
            Some(GraphEdge {
                id: format!("merge_{}_{target_id}", branch.id()),
                kind: EdgeKind::Merge,
                source: branch.id().clone(),
                target: target_id.clone(),
                source_color: branch.color().to_string(),
                target_color: color_of(target_id)
                    .unwrap_or_else(|| MISSING_MERGE_TARGET_COLOR.to_string()),
                is_active: false,
            })
        });

        Self {
            nodes,
            edges: lineage.chain(merges).collect(),
        }
    }

    /// Returns a node by branch id.
    #[must_use]
    pub fn node(&self, id: &BranchId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtifactSnapshot, Branch, Checkpoint, Project};

    fn branch(id: &str, parent: Option<&str>) -> Branch {
        Branch::new(BranchId::new(id), parent.map(BranchId::new), id, "", Utc::now()).unwrap()
    }

    fn store() -> BranchGraphStore {
        let mut project = Project::new("proj_test", "Test", "", BranchId::new("r"), Utc::now());
        project.branches = vec![
            branch("r", None)
                .with_position(Position::new(10.0, 10.0))
                .with_checkpoint(Checkpoint::capture(
                    BranchId::new("r"),
                    "Initial",
                    ArtifactSnapshot::new("<h1>Hi</h1>"),
                )),
            branch("a", Some("r")),
            branch("b", Some("r")).with_status(BranchStatus::Archived),
        ];
        BranchGraphStore::load(project).unwrap()
    }

    #[test]
    fn nodes_use_stored_or_seeded_positions() {
        let view = GraphView::build(&store(), &LayoutSettings::default());
        assert_eq!(view.nodes.len(), 3);

        let root = view.node(&BranchId::new("r")).unwrap();
        assert!(root.is_root);
        assert_eq!(root.position, Position::new(10.0, 10.0));
        assert_eq!(root.snapshot, "<h1>Hi</h1>");
        assert_eq!(root.checkpoint_count, 1);

        let a = view.node(&BranchId::new("a")).unwrap();
        assert_eq!(a.position, Position::new(250.0, 320.0));
        assert!(a.snapshot.is_empty());
    }

    #[test]
    fn lineage_edges_mark_active_children() {
        let view = GraphView::build(&store(), &LayoutSettings::default());
        assert_eq!(view.edges.len(), 2);
        assert_eq!(view.edges[0].id, "edge_r_a");
        assert!(view.edges[0].is_active);
        assert!(!view.edges[1].is_active);
        assert_eq!(view.edges[1].target_color, view.node(&BranchId::new("b")).unwrap().color);
    }

    #[test]
    fn merged_branches_get_a_merge_edge() {
        let mut store = store();
        store
            .merge_branches(&BranchId::new("a"), &BranchId::new("b"))
            .unwrap();

        let view = GraphView::build(&store, &LayoutSettings::default());
        let merge: Vec<_> = view
            .edges
            .iter()
            .filter(|edge| edge.kind == EdgeKind::Merge)
            .collect();
        assert_eq!(merge.len(), 1);
        assert_eq!(merge[0].id, "merge_a_b");
        assert_eq!(merge[0].source, BranchId::new("a"));
        assert_eq!(merge[0].target, BranchId::new("b"));
    }

    #[test]
    fn view_serializes_to_json() {
        let view = GraphView::build(&store(), &LayoutSettings::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["nodes"][0]["status"], "active");
        assert_eq!(json["edges"][0]["kind"], "lineage");
    }
}
