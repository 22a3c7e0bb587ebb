//! Secondary subscriber registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::controller::UpdateHandler;

/// Registered secondary callbacks, keyed by registration id.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    entries: HashMap<u64, Rc<UpdateHandler>>,
}

impl SubscriberRegistry {
    pub(crate) fn add(&mut self, handler: Rc<UpdateHandler>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, handler);
        id
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.entries.remove(&id);
    }

    /// Clone the current handlers for dispatch, in registration order.
    ///
    /// Dispatch iterates the snapshot, so registering or canceling
    /// subscribers while a dispatch runs affects only future dispatches.
    pub(crate) fn snapshot(&self) -> Vec<Rc<UpdateHandler>> {
        let mut entries: Vec<(u64, Rc<UpdateHandler>)> = self
            .entries
            .iter()
            .map(|(id, handler)| (*id, handler.clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, handler)| handler).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle returned by `VisibilityController::add_subscriber`.
///
/// `cancel` removes the subscriber from future dispatches. It is
/// idempotent and remains a no-op after the controller has been torn
/// down.
pub struct SubscriberToken {
    id: u64,
    registry: Weak<RefCell<SubscriberRegistry>>,
}

impl SubscriberToken {
    pub(crate) fn new(id: u64, registry: Weak<RefCell<SubscriberRegistry>>) -> Self {
        Self { id, registry }
    }

    /// Remove the associated subscriber.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}
