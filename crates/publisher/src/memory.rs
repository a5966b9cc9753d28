//! Transport-free publisher collecting records in memory.

use std::sync::{Mutex, PoisonError};

use aggregate::{DomainEvent, Publishable};

use crate::topic::TopicResolver;
use crate::{EventPublisher, ProducerRecord, PublishError};

/// In-memory event publisher.
///
/// Collects one [`ProducerRecord`] per published event instead of
/// touching a real transport. Used in tests and local development;
/// the record log preserves publish order across aggregates.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    resolver: TopicResolver,
    records: Mutex<Vec<ProducerRecord>>,
}

impl InMemoryEventPublisher {
    /// Creates a publisher with the default topic convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher with an explicit topic resolver.
    pub fn with_resolver(resolver: TopicResolver) -> Self {
        Self {
            resolver,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every record published so far, in order.
    pub fn records(&self) -> Vec<ProducerRecord> {
        self.lock().clone()
    }

    /// Returns the number of published records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all collected records.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProducerRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish_for<A>(&self, aggregate: &A) -> Result<(), PublishError>
    where
        A: Publishable,
    {
        let topic = self.resolver.resolve(aggregate.aggregate_name());
        let key = aggregate.id_as_string();

        // Serialize everything before appending so a failure publishes
        // nothing.
        let mut outgoing = Vec::with_capacity(aggregate.domain_events().len());
        for event in aggregate.domain_events() {
            tracing::info!(
                event_type = event.event_type(),
                version = event.version().as_u64(),
                topic = topic.name(),
                key = %key,
                "publishing event"
            );
            outgoing.push(ProducerRecord {
                topic: topic.name().to_string(),
                key: key.clone(),
                payload: serde_json::to_string(event)?,
            });
        }

        self.lock().extend(outgoing);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::Topic;
    use aggregate::{AggregateRoot, AggregateState, Version};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(tag = "type", content = "data")]
    enum NoteEvent {
        Written { text: String, version: Version },
    }

    impl DomainEvent for NoteEvent {
        fn event_type(&self) -> &'static str {
            "Written"
        }

        fn version(&self) -> Version {
            match self {
                NoteEvent::Written { version, .. } => *version,
            }
        }

        fn set_version(&mut self, new: Version) {
            match self {
                NoteEvent::Written { version, .. } => *version = new,
            }
        }
    }

    #[derive(Debug, Default)]
    struct NoteState {
        text: String,
    }

    impl AggregateState for NoteState {
        fn aggregate_name() -> &'static str {
            "note"
        }
    }

    fn note(id: u32, lines: &[&str]) -> AggregateRoot<u32, NoteState, NoteEvent> {
        let mut root = AggregateRoot::new(id);
        root.register("Written", |state: &mut NoteState, event| {
            let NoteEvent::Written { text, .. } = event;
            state.text = text.clone();
        });
        for line in lines {
            root.apply_event(NoteEvent::Written {
                text: (*line).to_string(),
                version: Version::initial(),
            })
            .unwrap();
        }
        root
    }

    #[test]
    fn publishes_every_recorded_event_in_order() {
        let publisher = InMemoryEventPublisher::new();
        let root = note(7, &["first", "second"]);

        publisher.publish_for(&root).unwrap();

        let records = publisher.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].payload.contains("first"));
        assert!(records[1].payload.contains("second"));
    }

    #[test]
    fn records_carry_topic_and_aggregate_key() {
        let publisher = InMemoryEventPublisher::new();
        let root = note(7, &["only"]);

        publisher.publish_for(&root).unwrap();

        let records = publisher.records();
        assert_eq!(records[0].topic, "note.events");
        assert_eq!(records[0].key, "7");
        assert_eq!(root.state().text, "only");
    }

    #[test]
    fn explicit_topic_mapping_is_honored() {
        let resolver = TopicResolver::new().with_mapping("note", Topic::new("notes.v2"));
        let publisher = InMemoryEventPublisher::with_resolver(resolver);
        let root = note(7, &["only"]);

        publisher.publish_for(&root).unwrap();

        assert_eq!(publisher.records()[0].topic, "notes.v2");
    }

    #[test]
    fn payload_is_a_self_describing_document() {
        let publisher = InMemoryEventPublisher::new();
        let root = note(7, &["hello"]);

        publisher.publish_for(&root).unwrap();

        let payload = &publisher.records()[0].payload;
        assert!(payload.contains("\"type\":\"Written\""));
        assert!(payload.contains("\"version\":1"));
    }

    #[test]
    fn publish_does_not_clear_the_aggregate() {
        let publisher = InMemoryEventPublisher::new();
        let root = note(7, &["first", "second"]);

        publisher.publish_for(&root).unwrap();

        assert_eq!(root.domain_events().len(), 2);
        assert!(root.is_new());
    }

    #[test]
    fn reset_drops_collected_records() {
        let publisher = InMemoryEventPublisher::new();
        publisher.publish_for(&note(7, &["x"])).unwrap();
        assert!(!publisher.is_empty());

        publisher.reset();
        assert!(publisher.is_empty());
    }
}
