//! Window-scoped pointer-release broadcasting.
//!
//! Cells only see `pointerdown`/`pointerenter`; the release has to be caught at
//! the window because users let go of the button outside the grid. The hub is
//! owned by the window root and handed out to grids, which subscribe for as
//! long as they are mounted. Dropping the [`ReleaseSubscription`] deregisters
//! the callback, so a remounted grid never ends up with two listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type ReleaseCallback = Box<dyn FnMut()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, ReleaseCallback)>,
    removed_during_dispatch: Vec<u64>,
}

#[derive(Clone, Default)]
pub struct PointerReleaseHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl PartialEq for PointerReleaseHub {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.listeners, &other.listeners)
    }
}

impl std::fmt::Debug for PointerReleaseHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerReleaseHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl PointerReleaseHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl FnMut() + 'static) -> ReleaseSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(callback)));
        ReleaseSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Runs every live subscriber once. Returns how many were notified.
    pub fn dispatch(&self) -> usize {
        // Callbacks are taken out for the call so one may subscribe or drop
        // a subscription without re-borrowing the list.
        let mut taken = std::mem::take(&mut self.listeners.borrow_mut().entries);
        for (_, callback) in taken.iter_mut() {
            callback();
        }
        let notified = taken.len();

        let mut listeners = self.listeners.borrow_mut();
        let added = std::mem::take(&mut listeners.entries);
        let removed = std::mem::take(&mut listeners.removed_during_dispatch);
        taken.retain(|(id, _)| !removed.contains(id));
        taken.extend(added);
        listeners.entries = taken;
        notified
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Keeps a release callback registered until dropped.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct ReleaseSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for ReleaseSubscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let Ok(mut listeners) = listeners.try_borrow_mut() else {
            return;
        };
        let before = listeners.entries.len();
        listeners.entries.retain(|(id, _)| *id != self.id);
        if listeners.entries.len() == before {
            listeners.removed_during_dispatch.push(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dropped_subscription_stops_receiving() {
        let hub = PointerReleaseHub::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let subscription = hub.subscribe(move || counter.set(counter.get() + 1));

        assert_eq!(hub.dispatch(), 1);
        drop(subscription);
        assert_eq!(hub.dispatch(), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = PointerReleaseHub::new();
        let subscription = hub.subscribe(|| {});
        drop(hub);
        drop(subscription);
    }
}
