//! Page-wide pointer-down notifications with scoped subscriptions.
//!
//! The page (or a test) owns a [`PointerHub`] and calls
//! [`dispatch`](PointerHub::dispatch) for every pointer-down. Widgets
//! subscribe once when mounted and hold the returned [`PointerSubscription`];
//! dropping the guard removes the listener. The hub lives on the UI thread,
//! so listeners don't need to be `Send`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::types::PointerTarget;

type Listener = Rc<dyn Fn(PointerTarget)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_id: BTreeMap<u64, Listener>,
}

#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<Listeners>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe(&self, listener: impl Fn(PointerTarget) + 'static) -> PointerSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.by_id.insert(id, Rc::new(listener));
        trace!(id, listeners = inner.by_id.len(), "Pointer listener attached");
        PointerSubscription { id, hub: Rc::downgrade(&self.inner) }
    }

    /// Deliver a pointer-down to every listener. Returns how many were called.
    pub fn dispatch(&self, target: PointerTarget) -> usize {
        // Snapshot first so listeners may subscribe or unsubscribe re-entrantly.
        let listeners: Vec<Listener> = self.inner.borrow().by_id.values().cloned().collect();
        for listener in &listeners {
            listener(target);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().by_id.len()
    }
}

impl fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHub").field("listeners", &self.listener_count()).finish()
    }
}

/// Guard for one registered listener.
#[derive(Debug)]
pub struct PointerSubscription {
    id: u64,
    hub: Weak<RefCell<Listeners>>,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.borrow_mut().by_id.remove(&self.id);
            trace!(id = self.id, "Pointer listener detached");
        }
    }
}
