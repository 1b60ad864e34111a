//! Canvas interaction configuration.
//!
//! Node footprint and blend detection settings for drag gestures.

use serde::Deserialize;

/// How a drag picks its blend target among overlapping nodes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlendTargetPolicy {
    /// First overlapping node in store iteration order.
    #[default]
    FirstFound,
    /// Overlapping node with the closest center.
    Nearest,
}

/// Settings for the drag-and-blend interaction.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    /// Rendered card width (default: 240)
    #[serde(default = "default_node_width")]
    pub node_width: f64,

    /// Rendered card height, preview plus info strip (default: 210)
    #[serde(default = "default_node_height")]
    pub node_height: f64,

    /// Blend threshold as a fraction of the node width (default: 0.75)
    #[serde(default = "default_blend_threshold_ratio")]
    pub blend_threshold_ratio: f64,

    /// Blend target selection policy (default: first found)
    #[serde(default)]
    pub blend_target_policy: BlendTargetPolicy,
}

impl CanvasSettings {
    /// Center distance below which two nodes overlap.
    #[must_use]
    pub fn blend_threshold(&self) -> f64 {
        self.node_width * self.blend_threshold_ratio
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            blend_threshold_ratio: default_blend_threshold_ratio(),
            blend_target_policy: BlendTargetPolicy::default(),
        }
    }
}

fn default_node_width() -> f64 {
    240.0
}

fn default_node_height() -> f64 {
    210.0
}

fn default_blend_threshold_ratio() -> f64 {
    0.75
}
