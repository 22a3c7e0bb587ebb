//! Screen-side collaborators: the owning screen and its overlay bar.

use std::rc::Rc;

use crate::style::HidingStyle;

/// Navigation-surface handle: the overlay bar whose background is toggled.
pub trait BarSurface {
    /// Paint the bar with its opaque background.
    fn set_background_visible(&self);

    /// Paint the bar with a transparent background.
    fn set_background_transparent(&self);
}

/// The screen owning the scrollable region and the overlay bar.
///
/// The controller reads the hiding style once per evaluation; the read
/// must be pure.
pub trait Screen {
    /// Per-screen hiding style. `Unknown` defers to the controller default.
    fn hiding_style(&self) -> HidingStyle {
        HidingStyle::Unknown
    }

    /// The screen's overlay bar, when one exists.
    fn bar(&self) -> Option<Rc<dyn BarSurface>> {
        None
    }
}
