//! Bake-completed notifications with scoped subscriptions, replacing
//! host-lifetime event hookup. Dropping the `Subscription` unsubscribes.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

pub type ListenerId = u64;

type Listener = Box<dyn FnMut()>;

struct Listeners {
    entries: Vec<(ListenerId, Listener)>,
    next_id: ListenerId,
}

/// Fired by the host when a lightmap/probe bake pass has completed, so
/// interested renderers can re-bake their specular highlights.
#[derive(Clone)]
pub struct BakeEvents {
    listeners: Arc<Mutex<Listeners>>,
}

impl BakeEvents {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Listeners {
                entries: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Registers a listener. Delivery stops when the returned
    /// `Subscription` is dropped.
    #[must_use]
    pub fn subscribe(&self, listener: impl FnMut() + 'static) -> Subscription {
        let mut listeners = self.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Invokes live listeners in registration order. Listeners must not
    /// subscribe or unsubscribe from inside the callback.
    pub fn emit(&self) {
        let mut listeners = self.listeners.lock();
        for (_, listener) in listeners.entries.iter_mut() {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }
}

impl Default for BakeEvents {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Subscription {
    id: ListenerId,
    listeners: Weak<Mutex<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().entries.retain(|(id, _)| *id != self.id);
        }
    }
}
