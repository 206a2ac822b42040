#![deny(warnings)]

//! Watched value store for hosting applications.
//!
//! The engine takes its inputs as plain borrowed values; the host keeps
//! the shared inventory (and anything else worth watching) in a
//! [`Store`]: one current value behind a lock, subscriber callbacks that
//! fire on every write, and [`Mirror`] channels that carry each new value
//! into other execution contexts. The engine itself never touches this
//! crate.

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use plan_core::Inventory;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
}

struct Shared<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<Subscriber<T>>>,
    mirrors: Mutex<Vec<Sender<T>>>,
    next_id: AtomicU64,
}

/// A watched value. Clones share the same state; every `set` or `update`
/// notifies subscribers in registration order and feeds every live
/// mirror.
///
/// Callbacks run on the writing thread while the subscriber list is
/// locked; they must not subscribe or unsubscribe from inside.
pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Store<T> {
    /// Create a store holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(initial),
                subscribers: Mutex::new(Vec::new()),
                mirrors: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a callback for every subsequent write. Dropping the
    /// returned [`Subscription`] unregisters it.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared.subscribers.lock().push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        Subscription {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    /// Open a channel that receives every subsequent value. A dropped
    /// mirror is pruned on the next write.
    pub fn mirror(&self) -> Mirror<T> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.shared.mirrors.lock().push(sender);
        Mirror { receiver }
    }
}

impl<T: Clone> Store<T> {
    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.shared.value.read().clone()
    }

    /// Replace the value and notify.
    pub fn set(&self, value: T) {
        *self.shared.value.write() = value.clone();
        self.notify(&value);
    }

    /// Mutate the value in place and notify with the result.
    pub fn update(&self, apply: impl FnOnce(&mut T)) {
        let value = {
            let mut guard = self.shared.value.write();
            apply(&mut guard);
            guard.clone()
        };
        self.notify(&value);
    }

    fn notify(&self, value: &T) {
        for subscriber in self.shared.subscribers.lock().iter() {
            (subscriber.callback)(value);
        }
        self.shared
            .mirrors
            .lock()
            .retain(|sender| sender.send(value.clone()).is_ok());
    }
}

/// Drop guard for one subscriber registration.
pub struct Subscription<T> {
    shared: Weak<Shared<T>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.subscribers.lock().retain(|s| s.id != self.id);
        }
    }
}

/// Receiving side of a store mirror: every value written after
/// [`Store::mirror`] arrives here, in write order.
pub struct Mirror<T> {
    receiver: Receiver<T>,
}

impl<T> Mirror<T> {
    /// Wait for the next written value. Returns `None` once the store is
    /// gone and the channel has drained.
    pub fn recv(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Take the next value if one is already queued.
    pub fn try_recv(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

/// The host's shared-inventory store.
pub type InventoryStore = Store<Inventory>;
