//! Event dispatcher routing domain events to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use super::{DomainEvent, EventHandler, HandlerError};

/// Registry mapping event names to ordered lists of handlers.
///
/// The dispatcher is an ordinary value: construct one with [`EventDispatcher::new`],
/// pass it by reference to whoever raises events, and reset it with
/// [`EventDispatcher::unregister_all`] between independent units of work.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the list for `event_name`.
    ///
    /// Registering the same handler twice means it is notified twice.
    pub fn register(&mut self, event_name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.handlers
            .entry(event_name.into())
            .or_default()
            .push(handler);
    }

    /// Removes the first registration of `handler` under `event_name`.
    ///
    /// Handlers are compared by identity, not by value. Returns true if a
    /// registration was removed.
    pub fn unregister(&mut self, event_name: &str, handler: &Arc<dyn EventHandler>) -> bool {
        let Some(list) = self.handlers.get_mut(event_name) else {
            return false;
        };

        let Some(pos) = list
            .iter()
            .position(|h| std::ptr::addr_eq(Arc::as_ptr(h), Arc::as_ptr(handler)))
        else {
            return false;
        };

        list.remove(pos);
        if list.is_empty() {
            self.handlers.remove(event_name);
        }
        true
    }

    /// Clears every registration.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered for `event_name`, in notification order.
    pub fn handlers(&self, event_name: &str) -> &[Arc<dyn EventHandler>] {
        self.handlers
            .get(event_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true if no handlers are registered for any event.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Notifies every handler registered for the event's name, in order.
    ///
    /// The first handler error is returned immediately; later handlers are
    /// not invoked.
    #[tracing::instrument(skip(self, event), fields(event_name = event.event_name()))]
    pub fn notify(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        let handlers = self.handlers(event.event_name());
        metrics::counter!("domain_events_notified_total", "event" => event.event_name())
            .increment(1);

        for handler in handlers {
            handler.handle(event)?;
            metrics::counter!("domain_event_handlers_invoked_total").increment(1);
        }

        tracing::debug!(handlers = handlers.len(), "event dispatched");
        Ok(())
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("handlers", &counts)
            .finish()
    }
}
