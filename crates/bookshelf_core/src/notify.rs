//! Synchronous publish/subscribe channel.
//!
//! # Responsibility
//! - Keep an ordered set of listeners for one event source.
//! - Dispatch events to every listener in subscription order.
//!
//! # Invariants
//! - Dispatch is synchronous and happens on the caller's stack.
//! - The first listener error stops dispatch and is returned unchanged.
//! - Listeners may subscribe/unsubscribe from inside `notify`; the change
//!   takes effect from the next `publish`.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

pub type ListenerResult<T> = Result<T, ListenerError>;

/// Failure reported by one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError {
    pub listener: String,
    pub message: String,
}

impl ListenerError {
    pub fn new(listener: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            listener: listener.into(),
            message: message.into(),
        }
    }
}

impl Display for ListenerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener `{}` failed: {}", self.listener, self.message)
    }
}

impl Error for ListenerError {}

/// Receiver of events published on an [`EventChannel`].
pub trait Listener<E: ?Sized> {
    fn notify(&self, event: &E) -> ListenerResult<()>;
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub struct EventChannel<E: ?Sized> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Listener<E>>)>>,
}

impl<E: ?Sized> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: Rc<dyn Listener<E>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes one listener. Returns `false` when the handle is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    pub fn publish(&self, event: &E) -> ListenerResult<()> {
        // Snapshot so listeners can touch the channel while being notified.
        let snapshot: Vec<Rc<dyn Listener<E>>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener.notify(event)?;
        }
        Ok(())
    }
}

impl<E: ?Sized> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> Debug for EventChannel<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.len())
            .finish()
    }
}
