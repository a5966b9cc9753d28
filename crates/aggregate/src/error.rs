//! Core error types.

use thiserror::Error;

/// Errors produced by the aggregate core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    /// An event was routed whose variant has no registered handler.
    ///
    /// This indicates a broken aggregate definition (a missing
    /// `register` call for a variant the aggregate can produce). It is
    /// fatal to the apply call and must never be retried: the failing
    /// apply leaves the aggregate's version, state and recorded events
    /// untouched.
    #[error("no handler registered for event type: {event_type}")]
    NoHandlerRegistered { event_type: &'static str },
}
