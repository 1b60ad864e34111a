//! Tree layout configuration.
//!
//! Spacing units and the anchor the root node is translated onto.

use serde::Deserialize;

use crate::domain::Position;

/// Settings for the breadth-first tree layout.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Horizontal distance between neighbours on one depth level (default: 300)
    #[serde(default = "default_horizontal_unit")]
    pub horizontal_unit: f64,

    /// Vertical distance between depth levels (default: 260)
    #[serde(default = "default_vertical_unit")]
    pub vertical_unit: f64,

    /// X coordinate the root is placed at (default: 400)
    #[serde(default = "default_anchor_x")]
    pub anchor_x: f64,

    /// Y coordinate the root is placed at (default: 60)
    #[serde(default = "default_anchor_y")]
    pub anchor_y: f64,
}

impl LayoutSettings {
    /// Returns the root anchor point.
    #[must_use]
    pub const fn anchor(&self) -> Position {
        Position::new(self.anchor_x, self.anchor_y)
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            horizontal_unit: default_horizontal_unit(),
            vertical_unit: default_vertical_unit(),
            anchor_x: default_anchor_x(),
            anchor_y: default_anchor_y(),
        }
    }
}

fn default_horizontal_unit() -> f64 {
    300.0
}

fn default_vertical_unit() -> f64 {
    260.0
}

fn default_anchor_x() -> f64 {
    400.0
}

fn default_anchor_y() -> f64 {
    60.0
}
