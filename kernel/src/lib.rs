//! Sprig Kernel - Core library for the Sprig branch graph.
//!
//! This crate provides the version-graph engine behind a branching design
//! canvas: the in-memory branch tree store, tree layout, drag-and-blend
//! interaction, and the debounced hover preview.

/// Canvas drag gestures, blend proposals, and the graph view model.
pub mod canvas;
/// Demo project used by the binary and tests.
pub mod demo;
/// Domain entities, identifiers, and validation rules.
pub mod domain;
/// Hover preview scheduling.
pub mod hover;
/// Infrastructure components (config, telemetry).
pub mod infrastructure;
/// Deterministic tree layout.
pub mod layout;
/// Delayed create and blend requests.
pub mod session;
/// Branch graph store and change events.
pub mod store;
/// Cancellable timers keyed by kind.
pub mod timers;
