//! Synchronous publish/subscribe channel.
//!
//! The bus connects producers (cell editors) to consumers (the grid holder)
//! without routing through the components in between. It is an explicit
//! handle: every component that talks on the bus is given a clone at
//! construction time, and all clones share the same subscriber list.
//!
//! Delivery is synchronous and happens in subscription order. There is no
//! buffering: an event published while nobody listens is simply dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Event name used by cell editors to request a matrix update.
pub const CELL_UPDATE: &str = "cell-update";

type Handler<P> = Rc<dyn Fn(&P)>;

struct Entry<P> {
    id: u64,
    event: String,
    handler: Handler<P>,
}

struct Registry<P> {
    next_id: u64,
    entries: Vec<Entry<P>>,
}

impl<P> Registry<P> {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

/// Shared handle to a publish/subscribe channel carrying payloads of type `P`.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use twobytwo::application::EventBus;
///
/// let bus: EventBus<i64> = EventBus::new();
/// let seen = Rc::new(Cell::new(0));
/// let sink = seen.clone();
/// let _subscription = bus.subscribe("tick", move |value| sink.set(*value));
///
/// assert_eq!(bus.publish("tick", &5), 1);
/// assert_eq!(seen.get(), 5);
/// ```
pub struct EventBus<P> {
    inner: Rc<RefCell<Registry<P>>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl<P: 'static> EventBus<P> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers `handler` for `event`.
    ///
    /// The handler stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&P) + 'static,
    {
        let handler: Handler<P> = Rc::new(handler);
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Entry {
                id,
                event: event.to_string(),
                handler,
            });
            id
        };
        tracing::trace!(event, id, "bus subscription added");

        let registry: Weak<RefCell<Registry<P>>> = Rc::downgrade(&self.inner);
        let event = event.to_string();
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().entries.retain(|e| e.id != id);
                    tracing::trace!(event = event.as_str(), id, "bus subscription removed");
                }
            })),
        }
    }

    /// Delivers `payload` to every handler subscribed to `event`.
    ///
    /// Handlers run synchronously in the order they subscribed. A handler
    /// may publish again from inside its callback, and nested events reach
    /// every subscriber, including handlers that are still running. Returns
    /// the number of handlers that received the payload.
    pub fn publish(&self, event: &str, payload: &P) -> usize {
        let targets: Vec<(u64, Handler<P>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event == event)
            .map(|e| (e.id, Rc::clone(&e.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in targets {
            // An earlier handler may have unsubscribed this one.
            if !self.inner.borrow().contains(id) {
                continue;
            }
            handler(payload);
            delivered += 1;
        }
        delivered
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event == event)
            .count()
    }
}

/// Keeps a bus handler registered. Dropping it unsubscribes the handler.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribes now. Equivalent to dropping the subscription.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
