//! Shared test utilities for integration tests.
//!
//! Provides small project builders and lookups used across the canvas, store,
//! and hover scenarios.

#![allow(dead_code)]

use chrono::Utc;
use sprig_kernel::demo;
use sprig_kernel::domain::{Branch, BranchId, Position, Project};
use sprig_kernel::infrastructure::config::LayoutSettings;
use sprig_kernel::store::BranchGraphStore;

/// Id of the root branch in [`single_root_store`].
pub const ROOT: &str = "branch_root";

/// Builds a branch with an optional parent and position.
pub fn branch(id: &str, parent: Option<&str>, position: Option<Position>) -> Branch {
    let branch = Branch::new(BranchId::new(id), parent.map(BranchId::new), id, "", Utc::now())
        .expect("Valid branch");
    match position {
        Some(position) => branch.with_position(position),
        None => branch,
    }
}

/// A store holding only the root branch.
pub fn single_root_store() -> BranchGraphStore {
    let project = Project::new("proj_it", "Integration", "", BranchId::new(ROOT), Utc::now())
        .with_branch(branch(ROOT, None, None));
    BranchGraphStore::load(project).expect("Load project")
}

/// The demo project loaded and laid out.
pub fn demo_store() -> BranchGraphStore {
    let project = demo::landing_page_project().expect("Valid demo project");
    let mut store = BranchGraphStore::load(project).expect("Load demo project");
    store.seed_positions(&LayoutSettings::default());
    store
}

/// Collects branch ids.
pub fn ids<'a>(branches: impl IntoIterator<Item = &'a Branch>) -> Vec<BranchId> {
    branches.into_iter().map(|b| b.id().clone()).collect()
}

/// Stored position of a branch.
pub fn position_of(store: &BranchGraphStore, id: &BranchId) -> Position {
    store
        .get_branch_by_id(id)
        .and_then(Branch::position)
        .expect("Positioned branch")
}
