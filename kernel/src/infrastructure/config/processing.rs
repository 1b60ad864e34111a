//! Processing delay configuration.
//!
//! Create and blend requests from the canvas apply after a short delay that
//! stands in for asynchronous work.

use std::time::Duration;

use serde::Deserialize;

/// Delays applied to canvas requests before they reach the store.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSettings {
    /// Delay before a requested branch is created (default: 600)
    #[serde(default = "default_create_delay_ms")]
    pub create_delay_ms: u64,

    /// Delay before a confirmed blend is applied (default: 1200)
    #[serde(default = "default_blend_delay_ms")]
    pub blend_delay_ms: u64,
}

impl ProcessingSettings {
    /// Create delay as a `Duration`.
    #[must_use]
    pub const fn create_delay(&self) -> Duration {
        Duration::from_millis(self.create_delay_ms)
    }

    /// Blend delay as a `Duration`.
    #[must_use]
    pub const fn blend_delay(&self) -> Duration {
        Duration::from_millis(self.blend_delay_ms)
    }
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            create_delay_ms: default_create_delay_ms(),
            blend_delay_ms: default_blend_delay_ms(),
        }
    }
}

fn default_create_delay_ms() -> u64 {
    600
}

fn default_blend_delay_ms() -> u64 {
    1200
}
