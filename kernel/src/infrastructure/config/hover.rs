//! Hover preview configuration.

use std::time::Duration;

use serde::Deserialize;

/// Debounce delays for the hover preview popup.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct HoverSettings {
    /// Sustained hover required before the popup opens (default: 350)
    #[serde(default = "default_open_delay_ms")]
    pub open_delay_ms: u64,

    /// Grace period after the pointer leaves before the popup closes (default: 120)
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
}

impl HoverSettings {
    /// Open delay as a `Duration`.
    #[must_use]
    pub const fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }

    /// Close delay as a `Duration`.
    #[must_use]
    pub const fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            open_delay_ms: default_open_delay_ms(),
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

fn default_open_delay_ms() -> u64 {
    350
}

fn default_close_delay_ms() -> u64 {
    120
}
