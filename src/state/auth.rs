//! Login-state broadcast for decoupled observers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navbar, login screen, route guards, and the request authenticator each
//! need to know whether a token is stored, and when that changes. They
//! subscribe here instead of polling the session store.
//!
//! DESIGN
//! ======
//! A shared cell holding the latest value plus an ordered listener registry.
//! New subscribers get the current value immediately (replay-latest). Delivery
//! is synchronous and runs with the registry unborrowed, so listeners may
//! subscribe, cancel, or publish from inside a callback.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(bool)>;

struct Registry {
    current: bool,
    /// Bumped on every publish; a delivery loop stops once it is stale.
    generation: u64,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(i, _)| *i == id)
    }
}

/// Replay-latest boolean stream: `true` while a token is stored.
#[derive(Clone)]
pub struct AuthBroadcaster {
    registry: Rc<RefCell<Registry>>,
}

impl AuthBroadcaster {
    #[must_use]
    pub fn new(initial: bool) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                current: initial,
                generation: 0,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Most recently published value.
    #[must_use]
    pub fn current(&self) -> bool {
        self.registry.borrow().current
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Register `listener` and immediately deliver the current value to it.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// cancelled or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(bool) + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let (id, current) = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::clone(&listener)));
            (id, registry.current)
        };
        listener(current);
        Subscription { id, registry: Rc::downgrade(&self.registry) }
    }

    /// Store `value` and deliver it to every subscriber in subscription order.
    ///
    /// A listener that publishes from inside its callback replaces `value`
    /// for the subscribers this emission has not reached yet.
    pub fn publish(&self, value: bool) {
        let (generation, snapshot) = {
            let mut registry = self.registry.borrow_mut();
            registry.current = value;
            registry.generation += 1;
            (registry.generation, registry.listeners.clone())
        };

        for (id, listener) in snapshot {
            {
                let registry = self.registry.borrow();
                if registry.generation != generation {
                    // A listener published a newer value, which has already
                    // reached everyone still subscribed.
                    return;
                }
                if !registry.contains(id) {
                    continue;
                }
            }
            listener(value);
        }
    }
}

/// Handle for one listener registration. Dropping it cancels the listener.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Stop receiving values. A no-op if the broadcaster is already gone.
    pub fn cancel(self) {
        drop(self);
    }

    /// Keep the listener registered for the broadcaster's whole lifetime.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }

    fn remove(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // The listener is dropped after the borrow ends; it may own other
        // subscriptions whose own drop needs the registry.
        let removed = match registry.try_borrow_mut() {
            Ok(mut registry) => {
                let index = registry.listeners.iter().position(|(id, _)| *id == self.id);
                index.map(|i| registry.listeners.remove(i))
            }
            Err(_) => {
                log::warn!("auth subscription {} cancelled while registry busy", self.id);
                None
            }
        };
        drop(removed);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}
