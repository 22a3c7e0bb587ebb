//! Per-screen hiding style and its resolution against a controller default.

use serde::{Deserialize, Serialize};

/// Per-screen policy for hiding the overlay bar background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HidingStyle {
    /// The screen declares no preference; the controller default applies.
    #[default]
    Unknown,
    /// Visibility follows the scroll offset against the threshold.
    Automatic,
    /// Background is always shown regardless of offset.
    AlwaysVisible,
    /// Background is never shown regardless of offset.
    AlwaysHidden,
}

impl HidingStyle {
    /// Substitute `default` for `Unknown`.
    ///
    /// `Unknown` never survives resolution: an `Unknown` default (which the
    /// controller prevents from being set) falls back to `Automatic`.
    #[inline]
    pub fn resolve(self, default: HidingStyle) -> HidingStyle {
        match self {
            HidingStyle::Unknown => match default {
                HidingStyle::Unknown => HidingStyle::Automatic,
                other => other,
            },
            other => other,
        }
    }
}
