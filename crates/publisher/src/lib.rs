//! Event publication for event-sourced aggregates.
//!
//! The aggregate core guarantees order and immutability of the events
//! it hands over; everything else — encoding, delivery, retries — is
//! this collaborator's concern. A publisher reads the aggregate's
//! recorded events in order, resolves a destination topic from the
//! aggregate name and ships one record per event.
//!
//! Clearing is an explicit step: after a successful publish the caller
//! must invoke `clear_domain_events()` on the aggregate. The publisher
//! never mutates the aggregate on its own, so a
//! published-but-not-cleared aggregate is a legal state.

pub mod memory;
pub mod topic;

pub use memory::InMemoryEventPublisher;
pub use topic::{Topic, TopicResolver};

use aggregate::Publishable;
use thiserror::Error;

/// Errors that can occur while publishing.
#[derive(Debug, Error)]
pub enum PublishError {
    /// An event could not be encoded for the wire.
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying transport rejected a record.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// A single wire record: one event bound for one topic.
///
/// The payload is a self-describing JSON document carrying the event's
/// variant tag, its payload fields and the version stamped at apply
/// time. The key is the aggregate identity, so all events of one
/// aggregate land on one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerRecord {
    pub topic: String,
    pub key: String,
    pub payload: String,
}

/// Contract for shipping an aggregate's recorded events to a transport.
pub trait EventPublisher {
    /// Publishes every recorded event of the aggregate, preserving
    /// recorder order.
    ///
    /// On success the caller is expected to clear the aggregate's
    /// recorded events; this method does not.
    fn publish_for<A>(&self, aggregate: &A) -> Result<(), PublishError>
    where
        A: Publishable;
}
