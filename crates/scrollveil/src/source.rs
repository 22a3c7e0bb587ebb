//! Scroll-source boundary.
//!
//! The controller observes a scroll source through the narrow
//! [`ScrollSource`] trait: snapshot reads plus a payload-free "offset
//! changed" notification. [`ObserverSet`] is the reusable
//! registration/notify helper for implementors, and [`ScrollViewport`] is
//! the crate's concrete in-process source for hosts (and tests) without
//! toolkit-provided scroll state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifies a registered offset observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// One-axis scrollable region as seen by the visibility controller.
///
/// Offset notifications carry no payload; observers re-read the snapshot
/// methods themselves. Snapshot methods must not mutate the source.
pub trait ScrollSource {
    /// Content offset along the scroll axis.
    fn offset(&self) -> f64;

    /// Leading inset (safe-area/content inset) added to the offset before
    /// the threshold comparison.
    fn leading_inset(&self) -> f64 {
        0.0
    }

    /// Start position of the first section when the source is a sectioned
    /// list, `None` otherwise.
    fn first_section_start(&self) -> Option<f64> {
        None
    }

    /// Whether the source shows header content above its first section.
    fn has_header_content(&self) -> bool {
        false
    }

    /// Register an observer called synchronously after every offset change.
    fn add_observer(&self, observer: Rc<dyn Fn()>) -> ObserverId;

    /// Remove a previously registered observer. Unknown ids are ignored.
    fn remove_observer(&self, id: ObserverId);
}

/// Registration and notification helper for [`ScrollSource`] implementors.
#[derive(Default)]
pub struct ObserverSet {
    next_id: Cell<u64>,
    observers: RefCell<Vec<(ObserverId, Rc<dyn Fn()>)>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, observer: Rc<dyn Fn()>) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, observer));
        id
    }

    pub fn remove(&self, id: ObserverId) {
        self.observers
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Notify every observer registered at the time of the call.
    ///
    /// Iterates a snapshot, so observers may register or unregister while
    /// being notified without affecting the current round.
    pub fn notify(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in snapshot {
            observer();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }
}

/// Concrete single-axis scroll source.
///
/// `set_offset` stores the new position and notifies observers
/// synchronously; the remaining setters adjust the snapshot without
/// notifying (callers that move the threshold without scrolling are
/// expected to force a controller update themselves).
#[derive(Default)]
pub struct ScrollViewport {
    offset: Cell<f64>,
    leading_inset: Cell<f64>,
    first_section_start: Cell<Option<f64>>,
    header_content: Cell<bool>,
    observers: ObserverSet,
}

impl ScrollViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new offset and notify observers.
    pub fn set_offset(&self, offset: f64) {
        self.offset.set(offset);
        self.observers.notify();
    }

    pub fn set_leading_inset(&self, inset: f64) {
        self.leading_inset.set(inset);
    }

    pub fn set_first_section_start(&self, start: Option<f64>) {
        self.first_section_start.set(start);
    }

    pub fn set_header_content(&self, has_header: bool) {
        self.header_content.set(has_header);
    }
}

impl ScrollSource for ScrollViewport {
    fn offset(&self) -> f64 {
        self.offset.get()
    }

    fn leading_inset(&self) -> f64 {
        self.leading_inset.get()
    }

    fn first_section_start(&self) -> Option<f64> {
        self.first_section_start.get()
    }

    fn has_header_content(&self) -> bool {
        self.header_content.get()
    }

    fn add_observer(&self, observer: Rc<dyn Fn()>) -> ObserverId {
        self.observers.add(observer)
    }

    fn remove_observer(&self, id: ObserverId) {
        self.observers.remove(id);
    }
}
