use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::style::HidingStyle;

/// Cross-fade and default-style configuration for visibility controllers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Animate background transitions when a dispatch is animated.
    #[serde(default = "default_animations_enabled")]
    pub animations_enabled: bool,
    /// Cross-fade duration in milliseconds.
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    /// Fallback style for screens that report `unknown`.
    #[serde(default = "default_style")]
    pub default_style: HidingStyle,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            animations_enabled: default_animations_enabled(),
            animation_duration_ms: default_animation_duration_ms(),
            default_style: default_style(),
        }
    }
}

impl FadeConfig {
    /// Get the cross-fade duration as a `Duration`.
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Load configuration from a toml file, or return defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a toml file, creating parent directories.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

fn default_animations_enabled() -> bool {
    true
}

fn default_animation_duration_ms() -> u64 {
    250
}

fn default_style() -> HidingStyle {
    HidingStyle::Automatic
}
