//! Configuration management for the Sprig kernel.
//!
//! This module provides structured configuration for telemetry, tree layout,
//! canvas interaction, hover previews, and processing delays.
//!
//! # Example
//!
//! ```
//! use sprig_kernel::infrastructure::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! assert!(settings.layout.horizontal_unit > 0.0);
//! ```

pub mod canvas;
pub mod hover;
pub mod layout;
pub mod processing;
pub mod telemetry;

pub use canvas::{BlendTargetPolicy, CanvasSettings};
pub use hover::HoverSettings;
pub use layout::LayoutSettings;
pub use processing::ProcessingSettings;
pub use telemetry::TelemetrySettings;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Environment variable prefix used by `Settings::new`.
pub const ENV_PREFIX: &str = "SPRIG";

/// Top-level configuration for the Sprig kernel.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Telemetry settings.
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    /// Tree layout settings.
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Canvas interaction settings.
    #[serde(default)]
    pub canvas: CanvasSettings,
    /// Hover preview settings.
    #[serde(default)]
    pub hover: HoverSettings,
    /// Processing delay settings.
    #[serde(default)]
    pub processing: ProcessingSettings,
}

impl Settings {
    /// Creates a new settings instance from `SPRIG__*` environment variables and defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_prefix(ENV_PREFIX)
    }

    /// Same as [`Settings::new`], reading variables under a custom prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("telemetry.service_name", "sprig")?
            .set_default("telemetry.log_level", "info")?
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
