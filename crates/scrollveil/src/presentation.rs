//! Presentation collaborators for the default dispatch path.
//!
//! Each handler is independently overridable on the controller. The
//! defaults delegate to the screen's bar surface and apply changes
//! immediately; hosts with a real animation engine install their own
//! cross-fade scope.

use std::rc::Rc;
use std::time::Duration;

use crate::screen::Screen;

/// Options for the host's cross-fade animation scope.
#[derive(Debug, Clone, Copy)]
pub struct FadeOptions {
    /// Begin from the bar's current visual state instead of restarting.
    pub begin_from_current_state: bool,
    /// Keep accepting user interaction while the fade runs.
    pub allow_user_interaction: bool,
}

impl Default for FadeOptions {
    fn default() -> Self {
        Self {
            begin_from_current_state: true,
            allow_user_interaction: true,
        }
    }
}

/// Host-provided animation wrapper: runs `body` either immediately or
/// inside a cross-fade of the given duration.
pub type AnimationScope = Rc<dyn Fn(Duration, FadeOptions, &mut dyn FnMut())>;

/// Handler applying one side of the visual change to a screen.
pub type PresentationHandler = Rc<dyn Fn(&dyn Screen)>;

/// The default dispatch path's collaborators.
#[derive(Clone)]
pub struct Presentation {
    pub show: PresentationHandler,
    pub hide: PresentationHandler,
    pub animate: AnimationScope,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            show: Rc::new(|screen: &dyn Screen| {
                if let Some(bar) = screen.bar() {
                    bar.set_background_visible();
                }
            }),
            hide: Rc::new(|screen: &dyn Screen| {
                if let Some(bar) = screen.bar() {
                    bar.set_background_transparent();
                }
            }),
            animate: Rc::new(|_duration, _options, body: &mut dyn FnMut()| body()),
        }
    }
}
