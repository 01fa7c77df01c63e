use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{events::LifecycleEvent, types::LifecycleEventKind};

pub type Listener = Arc<dyn Fn(&mut LifecycleEvent) + Send + Sync>;

pub trait EventDispatcher: Send + Sync {
    /// Registers `listener` for `kind`. Higher priorities run first; equal
    /// priorities run in registration order.
    fn add_listener(&self, kind: LifecycleEventKind, listener: Listener, priority: i32);

    /// Runs the listeners of the event's kind and returns the event.
    fn dispatch(&self, event: LifecycleEvent) -> LifecycleEvent;
}

/// Dispatcher used when nobody listens. Registrations are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDispatcher;

impl EventDispatcher for NoopDispatcher {
    fn add_listener(&self, _kind: LifecycleEventKind, _listener: Listener, _priority: i32) {}

    fn dispatch(&self, event: LifecycleEvent) -> LifecycleEvent {
        event
    }
}

struct Registration {
    priority: i32,
    listener: Listener,
}

/// Synchronous in-process dispatcher.
#[derive(Default)]
pub struct ListenerDispatcher {
    listeners: RwLock<HashMap<LifecycleEventKind, Vec<Registration>>>,
}

impl ListenerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self, kind: LifecycleEventKind) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

impl EventDispatcher for ListenerDispatcher {
    fn add_listener(&self, kind: LifecycleEventKind, listener: Listener, priority: i32) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let registrations = listeners.entry(kind).or_default();
        let at = registrations.partition_point(|r| r.priority >= priority);
        registrations.insert(at, Registration { priority, listener });
    }

    fn dispatch(&self, mut event: LifecycleEvent) -> LifecycleEvent {
        // snapshot so listeners may register further listeners
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event.kind())
            .map(|rs| rs.iter().map(|r| r.listener.clone()).collect())
            .unwrap_or_default();

        for listener in listeners {
            if event.is_stopped() {
                break;
            }
            listener(&mut event);
        }
        event
    }
}
