//! Per-instance routing of events to state-mutating handlers.

use std::collections::HashMap;

use crate::error::AggregateError;
use crate::event::DomainEvent;

type Handler<S, E> = Box<dyn Fn(&mut S, &E) + Send + Sync>;

/// Maps event variant tags to handlers that mutate aggregate state.
///
/// Each aggregate root owns exactly one router. Registration is
/// per-instance and explicit; there is no process-wide registry. At
/// most one handler exists per variant tag, and every variant an
/// aggregate can produce must be registered before the first apply.
pub struct EventRouter<S, E> {
    handlers: HashMap<&'static str, Handler<S, E>>,
}

impl<S, E> EventRouter<S, E>
where
    E: DomainEvent,
{
    /// Creates a router with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Installs the handler for a variant tag.
    ///
    /// Registering the same tag twice silently replaces the previous
    /// handler.
    pub fn register<F>(&mut self, event_type: &'static str, handler: F)
    where
        F: Fn(&mut S, &E) + Send + Sync + 'static,
    {
        if self.handlers.insert(event_type, Box::new(handler)).is_some() {
            tracing::debug!(event_type, "replacing registered event handler");
        }
    }

    /// Routes an event to the handler registered for its variant tag.
    ///
    /// Fails with [`AggregateError::NoHandlerRegistered`] before
    /// touching `state` if the variant was never registered. A missing
    /// handler is a code defect, not a transient condition.
    pub fn route(&self, state: &mut S, event: &E) -> Result<(), AggregateError> {
        let handler =
            self.handlers
                .get(event.event_type())
                .ok_or(AggregateError::NoHandlerRegistered {
                    event_type: event.event_type(),
                })?;
        handler(state, event);
        Ok(())
    }

    /// Returns true if a handler is registered for the tag.
    pub fn is_registered(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S, E> Default for EventRouter<S, E>
where
    E: DomainEvent,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> std::fmt::Debug for EventRouter<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("registered", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
