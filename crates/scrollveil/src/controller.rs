//! Visibility decision engine.
//!
//! A [`VisibilityController`] observes one scroll source for its lifetime,
//! decides through the configured policies whether the owning screen's
//! overlay bar background should be visible, and dispatches each
//! transition to a primary handler plus registered subscribers.
//!
//! Redundant evaluations are suppressed by comparing the computed
//! visibility against the current state; re-entrant evaluations (a
//! dispatch whose side effects scroll the source) are suppressed by a
//! guard flag that is released on every exit path, including unwinds from
//! caller-supplied policies and handlers. A panicking handler aborts the
//! remaining dispatch; it never leaves the controller stuck.
//!
//! Everything here is single-threaded and synchronous: every evaluation
//! runs to completion before the next notification can be processed.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::FadeConfig;
use crate::policy::{default_threshold, should_show_background, OffsetPolicy};
use crate::presentation::{AnimationScope, FadeOptions, Presentation, PresentationHandler};
use crate::registry::{SubscriberRegistry, SubscriberToken};
use crate::screen::Screen;
use crate::source::{ObserverId, ScrollSource};
use crate::style::HidingStyle;

/// Callback receiving each visibility transition: `(controller, animated)`.
pub type UpdateHandler = dyn Fn(&VisibilityController, bool);

/// Scroll-driven overlay-bar background visibility state machine.
///
/// Cheap to clone; clones share state. The controller holds only weak
/// references to its screen and scroll source and becomes inert (silent
/// no-op evaluations) once either is dropped.
#[derive(Clone)]
pub struct VisibilityController {
    inner: Rc<ControllerInner>,
}

struct ControllerInner {
    screen: Weak<dyn Screen>,
    source: Weak<dyn ScrollSource>,
    config: FadeConfig,
    /// Authoritative state: always equals the last dispatched value.
    showing: Cell<bool>,
    /// Never `Unknown`.
    default_style: Cell<HidingStyle>,
    /// True only while a dispatch is on the stack.
    ignore_scroll_changes: Cell<bool>,
    offset_policy: RefCell<Option<OffsetPolicy>>,
    primary_handler: RefCell<Option<Rc<UpdateHandler>>>,
    presentation: RefCell<Presentation>,
    subscribers: Rc<RefCell<SubscriberRegistry>>,
    observer: Cell<Option<ObserverId>>,
}

/// Clears `ignore_scroll_changes` when dropped, including during unwinds
/// from caller-supplied policies and handlers.
struct ReentrancyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ReentrancyGuard<'a> {
    fn arm(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl VisibilityController {
    /// Attach a controller to a screen/scroll-source pair with the default
    /// threshold policy.
    ///
    /// Observation starts immediately: a forced, non-animated evaluation
    /// runs before this returns, so the state reflects the source's
    /// starting position. A controller is bound to its source for life;
    /// swapping sources means disposing and attaching a new controller.
    pub fn attach<S, Src>(screen: &Rc<S>, source: &Rc<Src>, config: FadeConfig) -> Self
    where
        S: Screen + 'static,
        Src: ScrollSource + 'static,
    {
        Self::attach_inner(screen.clone(), source.clone(), config, None)
    }

    /// Attach with a caller-supplied threshold policy, installed before
    /// the initial evaluation runs.
    pub fn attach_with_policy<S, Src>(
        screen: &Rc<S>,
        source: &Rc<Src>,
        config: FadeConfig,
        offset_policy: OffsetPolicy,
    ) -> Self
    where
        S: Screen + 'static,
        Src: ScrollSource + 'static,
    {
        Self::attach_inner(screen.clone(), source.clone(), config, Some(offset_policy))
    }

    fn attach_inner(
        screen: Rc<dyn Screen>,
        source: Rc<dyn ScrollSource>,
        config: FadeConfig,
        offset_policy: Option<OffsetPolicy>,
    ) -> Self {
        let default_style = match config.default_style {
            HidingStyle::Unknown => {
                tracing::warn!("default_style 'unknown' coerced to 'automatic'");
                HidingStyle::Automatic
            }
            style => style,
        };

        let inner = Rc::new(ControllerInner {
            screen: Rc::downgrade(&screen),
            source: Rc::downgrade(&source),
            config,
            showing: Cell::new(false),
            default_style: Cell::new(default_style),
            ignore_scroll_changes: Cell::new(false),
            offset_policy: RefCell::new(offset_policy),
            primary_handler: RefCell::new(None),
            presentation: RefCell::new(Presentation::default()),
            subscribers: Rc::new(RefCell::new(SubscriberRegistry::default())),
            observer: Cell::new(None),
        });

        // The source holds only a weak back-reference; dropping the last
        // controller handle detaches the observation.
        let weak = Rc::downgrade(&inner);
        let id = source.add_observer(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                VisibilityController { inner }.evaluate(true, false);
            }
        }));
        inner.observer.set(Some(id));

        let controller = Self { inner };
        tracing::debug!("visibility controller attached");
        controller.evaluate(false, true);
        controller
    }

    /// Current, authoritative visibility state: the last value dispatched
    /// to handlers. Never "pending".
    pub fn is_showing_background(&self) -> bool {
        self.inner.showing.get()
    }

    /// Fallback style applied when the screen reports `Unknown`.
    pub fn default_style(&self) -> HidingStyle {
        self.inner.default_style.get()
    }

    /// Replace the fallback style. `Unknown` is rejected: the default must
    /// always resolve.
    pub fn set_default_style(&self, style: HidingStyle) {
        if style == HidingStyle::Unknown {
            tracing::warn!("ignoring attempt to set default_style to 'unknown'");
            return;
        }
        self.inner.default_style.set(style);
    }

    /// Override (or clear) the threshold policy.
    pub fn set_offset_policy(&self, policy: Option<OffsetPolicy>) {
        *self.inner.offset_policy.borrow_mut() = policy;
    }

    /// Override (or clear) the primary update handler. When set it
    /// replaces the default presentation dispatch entirely.
    pub fn set_primary_handler(&self, handler: Option<Rc<UpdateHandler>>) {
        *self.inner.primary_handler.borrow_mut() = handler;
    }

    /// Override the "make background visible" presentation handler.
    pub fn set_show_handler(&self, handler: PresentationHandler) {
        self.inner.presentation.borrow_mut().show = handler;
    }

    /// Override the "make background transparent" presentation handler.
    pub fn set_hide_handler(&self, handler: PresentationHandler) {
        self.inner.presentation.borrow_mut().hide = handler;
    }

    /// Install the host's cross-fade animation scope.
    pub fn set_animation_scope(&self, scope: AnimationScope) {
        self.inner.presentation.borrow_mut().animate = scope;
    }

    /// Register a secondary subscriber.
    ///
    /// Never invoked synchronously at registration; fires on every
    /// subsequent transition until the returned token is canceled.
    pub fn add_subscriber(&self, handler: Rc<UpdateHandler>) -> SubscriberToken {
        let id = self.inner.subscribers.borrow_mut().add(handler);
        SubscriberToken::new(id, Rc::downgrade(&self.inner.subscribers))
    }

    /// Force a re-evaluation, dispatching even when the computed
    /// visibility matches the current state. Use when policy inputs
    /// changed without a scroll event.
    pub fn update(&self, animated: bool) {
        self.evaluate(animated, true);
    }

    /// Detach scroll observation and release the subscriber registry.
    ///
    /// The controller no longer reacts to scroll changes; explicit
    /// `update` calls still evaluate while both collaborators live.
    pub fn dispose(&self) {
        self.detach();
        self.inner.subscribers.borrow_mut().clear();
        tracing::debug!("visibility controller disposed");
    }

    fn detach(&self) {
        if let Some(id) = self.inner.observer.take() {
            if let Some(source) = self.inner.source.upgrade() {
                source.remove_observer(id);
            }
        }
    }

    fn evaluate(&self, animated: bool, forced: bool) {
        let inner = &*self.inner;
        if inner.ignore_scroll_changes.get() {
            tracing::trace!("evaluation skipped: dispatch in progress");
            return;
        }
        let (Some(screen), Some(source)) = (inner.screen.upgrade(), inner.source.upgrade())
        else {
            tracing::trace!("evaluation skipped: screen or scroll source gone");
            return;
        };

        let _guard = ReentrancyGuard::arm(&inner.ignore_scroll_changes);

        // Policies are cloned out so no borrow is held while caller code
        // runs; re-entry is rejected by the guard, never by a RefCell.
        let offset_policy = inner.offset_policy.borrow().clone();
        let threshold = match offset_policy {
            Some(policy) => policy(&*source),
            None => default_threshold(&*source),
        };
        let current_offset = source.offset() + source.leading_inset();
        let desired = should_show_background(
            screen.hiding_style(),
            inner.default_style.get(),
            current_offset,
            threshold,
        );

        if desired == inner.showing.get() && !forced {
            return;
        }
        inner.showing.set(desired);
        tracing::debug!(
            showing = desired,
            offset = current_offset,
            threshold,
            animated,
            forced,
            "bar background visibility updated"
        );

        let primary = inner.primary_handler.borrow().clone();
        match primary {
            Some(handler) => handler(self, animated),
            None => self.dispatch_presentation(&*screen, animated),
        }

        let subscribers = inner.subscribers.borrow().snapshot();
        for handler in subscribers {
            handler(self, animated);
        }
    }

    fn dispatch_presentation(&self, screen: &dyn Screen, animated: bool) {
        let presentation = self.inner.presentation.borrow().clone();
        let showing = self.inner.showing.get();
        let mut apply = || {
            if showing {
                (presentation.show)(screen);
            } else {
                (presentation.hide)(screen);
            }
        };

        let animate = animated && self.inner.config.animations_enabled && screen.bar().is_some();
        if animate {
            (presentation.animate)(
                self.inner.config.animation_duration(),
                FadeOptions::default(),
                &mut apply,
            );
        } else {
            apply();
        }
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Some(id) = self.observer.take() {
            if let Some(source) = self.source.upgrade() {
                source.remove_observer(id);
            }
        }
    }
}
