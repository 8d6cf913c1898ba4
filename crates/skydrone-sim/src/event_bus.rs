//! Generic publish/subscribe bus keyed by event kind.
//!
//! Listeners are boxed closures identified by the `ListenerId` returned from
//! `subscribe`. Delivery is synchronous and runs to completion inside `emit`.
//! Listener order is not part of the contract.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

/// An event that can travel over an [`EventBus`].
pub trait BusEvent {
    /// Key listeners subscribe under.
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}

/// Token identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Outcome of a single `emit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Listeners that were invoked.
    pub invoked: usize,
    /// Of those, how many panicked.
    pub panicked: usize,
}

type Listener<E> = Box<dyn FnMut(&E)>;

/// Maps event kinds to their subscribed listeners.
pub struct EventBus<E: BusEvent> {
    listeners: HashMap<E::Kind, Vec<(ListenerId, Listener<E>)>>,
    next_id: u64,
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every future emission of `kind`.
    pub fn subscribe(&mut self, kind: E::Kind, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, kind: E::Kind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(&kind);
        }
        removed
    }

    /// Deliver `event` to every listener of its kind.
    ///
    /// Each listener runs in isolation: a panicking listener is logged and
    /// the remaining listeners still receive the event.
    pub fn emit(&mut self, event: &E) -> Delivery {
        let kind = event.kind();
        let mut delivery = Delivery::default();
        let Some(list) = self.listeners.get_mut(&kind) else {
            return delivery;
        };

        for (id, callback) in list.iter_mut() {
            delivery.invoked += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(event)));
            if outcome.is_err() {
                delivery.panicked += 1;
                warn!(?kind, listener = id.0, "event listener panicked");
            }
        }
        delivery
    }

    /// Drop every subscription.
    pub fn clear_all(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
