//! # scrollveil
//!
//! Scroll-driven overlay-bar background visibility.
//!
//! A [`VisibilityController`] watches one scroll source, decides through
//! pluggable policies whether the owning screen's overlay bar should paint
//! an opaque background, and dispatches each transition to a primary
//! handler plus registered subscribers — without flicker, feedback loops,
//! or redundant updates.
//!
//! Rendering, toolkit scroll plumbing, and the actual cross-fade are host
//! concerns reached through the [`Screen`], [`ScrollSource`], and
//! [`AnimationScope`] seams; this crate only makes the decision and fans
//! it out. Everything is single-threaded and synchronous.
//!
//! ```
//! use std::rc::Rc;
//! use scrollveil::{FadeConfig, HidingStyle, Screen, ScrollViewport, VisibilityController};
//!
//! struct ArticleScreen;
//!
//! impl Screen for ArticleScreen {
//!     fn hiding_style(&self) -> HidingStyle {
//!         HidingStyle::Automatic
//!     }
//! }
//!
//! let screen = Rc::new(ArticleScreen);
//! let viewport = Rc::new(ScrollViewport::new());
//! let controller = VisibilityController::attach(&screen, &viewport, FadeConfig::default());
//!
//! viewport.set_offset(120.0);
//! assert!(controller.is_showing_background());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod policy;
pub mod presentation;
pub mod registry;
pub mod screen;
pub mod source;
pub mod style;

pub use config::FadeConfig;
pub use controller::{UpdateHandler, VisibilityController};
pub use error::{Error, Result};
pub use policy::{default_threshold, should_show_background, OffsetPolicy};
pub use presentation::{AnimationScope, FadeOptions, Presentation, PresentationHandler};
pub use registry::SubscriberToken;
pub use screen::{BarSurface, Screen};
pub use source::{ObserverId, ObserverSet, ScrollSource, ScrollViewport};
pub use style::HidingStyle;
