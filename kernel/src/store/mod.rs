//! Branch graph store - in-memory project state and change notifications.

/// Store change events and their broadcast bus.
pub mod events;
/// The branch graph store.
pub mod graph;
/// Branch arena with a children index.
pub mod index;

pub use events::{EventBus, EventReceiver, StoreEvent};
pub use graph::{BranchGraphStore, MergeOutcome, StoreError};
pub use index::BranchArena;

use std::sync::Arc;

use parking_lot::RwLock;

/// Store handle shared between the canvas and delayed processing tasks.
pub type SharedStore = Arc<RwLock<BranchGraphStore>>;

/// Wraps a store for sharing.
#[must_use]
pub fn shared(store: BranchGraphStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}
