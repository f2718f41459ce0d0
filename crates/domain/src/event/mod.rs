//! Domain events and their handlers.

mod dispatcher;

pub use dispatcher::EventDispatcher;

use std::any::Any;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable snapshots taken when the event is raised and should
/// be named in past tense.
pub trait DomainEvent: Any + Send + Sync + std::fmt::Debug {
    /// Returns the event name handlers are registered under.
    fn event_name(&self) -> &'static str;

    /// Returns when the event was raised.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Returns the event as `Any` so handlers can recover the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl dyn DomainEvent + '_ {
    /// Returns the concrete event if it is of type `T`.
    pub fn downcast_ref<T: DomainEvent>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Errors raised by event handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler was notified with an event type it does not understand.
    #[error("Handler {handler} cannot handle event {event_name}")]
    UnexpectedEvent {
        handler: &'static str,
        event_name: &'static str,
    },

    /// The handler's side effect failed.
    #[error("Handler failed: {0}")]
    Failed(String),
}

/// A side-effecting reaction to a domain event.
///
/// Handlers are invoked synchronously by the [`EventDispatcher`]; an error
/// aborts the remaining notifications and is returned to the caller.
pub trait EventHandler: Send + Sync {
    /// Handles a single event.
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError>;
}

/// Downcasts `event` to `T` or reports it as unexpected for `handler`.
pub(crate) fn expect_event<'a, T: DomainEvent>(
    handler: &'static str,
    event: &'a dyn DomainEvent,
) -> Result<&'a T, HandlerError> {
    event
        .downcast_ref::<T>()
        .ok_or(HandlerError::UnexpectedEvent {
            handler,
            event_name: event.event_name(),
        })
}
