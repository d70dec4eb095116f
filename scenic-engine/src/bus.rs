//! Minimal typed publish/subscribe used to fan engine events out to
//! collaborators.

use crate::event::{EngineEvent, EventKind};

/// A subscribed event listener.
pub type Listener = Box<dyn FnMut(&EngineEvent)>;

/// One-to-many fan-out of [`EngineEvent`]s, keyed by [`EventKind`].
///
/// Listeners are invoked synchronously, in subscription order, during
/// [`EventBus::emit`].
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(EventKind, Listener)>,
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener for one event kind.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&EngineEvent) + 'static) {
        self.listeners.push((kind, Box::new(listener)));
    }

    /// Dispatch an event to all listeners subscribed to its kind.
    pub fn emit(&mut self, event: &EngineEvent) {
        let kind = event.kind();
        for (subscribed, listener) in &mut self.listeners {
            if *subscribed == kind {
                listener(event);
            }
        }
    }

    /// Number of listeners subscribed for the given kind.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(k, _)| *k == kind).count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
