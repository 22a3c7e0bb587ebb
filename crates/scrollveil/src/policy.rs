//! Pure decision functions feeding the visibility controller.
//!
//! Both functions are synchronous and must not mutate the scroll source.
//! A panicking caller-supplied policy unwinds to whoever triggered the
//! evaluation; the controller only guarantees its re-entrancy guard is
//! released.

use std::rc::Rc;

use crate::source::ScrollSource;
use crate::style::HidingStyle;

/// Caller-supplied threshold policy: maps a scroll-source snapshot to the
/// offset at which visibility flips.
pub type OffsetPolicy = Rc<dyn Fn(&dyn ScrollSource) -> f64>;

/// Default threshold: the first section's start for a sectioned source
/// with no header content, otherwise 0.
#[inline]
pub fn default_threshold(source: &dyn ScrollSource) -> f64 {
    if source.has_header_content() {
        0.0
    } else {
        source.first_section_start().unwrap_or(0.0)
    }
}

/// Decide whether the bar background should be visible.
///
/// Style overrides dominate the offset; `Automatic` shows the background
/// iff `current_offset > threshold`. `current_offset` must already be
/// inset-adjusted (offset plus leading inset). `Unknown` is resolved
/// through `default_style` before the comparison can be reached.
#[inline]
pub fn should_show_background(
    style: HidingStyle,
    default_style: HidingStyle,
    current_offset: f64,
    threshold: f64,
) -> bool {
    match style.resolve(default_style) {
        HidingStyle::AlwaysHidden => false,
        HidingStyle::AlwaysVisible => true,
        // resolve() never yields Unknown
        HidingStyle::Automatic | HidingStyle::Unknown => current_offset > threshold,
    }
}
