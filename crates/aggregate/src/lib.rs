//! Event-sourced aggregate core.
//!
//! Aggregates mutate state exclusively by generating and replaying
//! immutable domain events. Each aggregate root owns a per-instance
//! [`EventRouter`] that dispatches events to state-mutating handlers,
//! and an [`EventRecorder`] that buffers events until an external
//! publisher ships them to a transport.
//!
//! The crate is pure in-memory computation: no I/O, no locking, no
//! suspension. A single aggregate instance must not be mutated from
//! two threads at once; the [`Version`] stamped on every event is the
//! optimistic-concurrency token for whatever persistence layer sits
//! outside.

pub mod error;
pub mod event;
pub mod recorder;
pub mod root;
pub mod router;

pub use error::AggregateError;
pub use event::{DomainEvent, Version};
pub use recorder::EventRecorder;
pub use root::{AggregateRoot, AggregateState, Publishable};
pub use router::EventRouter;
