//! Ordered buffer of events not yet published.

/// Append-only buffer of domain events awaiting publication.
///
/// Insertion order is significant: it defines both replay order and
/// publish order. Each aggregate root owns exactly one recorder; the
/// recorder contains only events that have not been published and
/// cleared yet.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder<E> {
    records: Vec<E>,
}

impl<E> EventRecorder<E> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends one event to the tail of the buffer.
    pub fn record(&mut self, event: E) {
        self.records.push(event);
    }

    /// Returns the recorded events, oldest first.
    ///
    /// Repeated calls without an intervening mutation return the same
    /// sequence.
    pub fn records(&self) -> &[E] {
        &self.records
    }

    /// Clears the buffer.
    ///
    /// Intended to be invoked by the publication path after a
    /// successful send; the core never calls this on its own.
    pub fn remove_all(&mut self) {
        self.records.clear();
    }

    /// Returns the number of buffered events.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no events are buffered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
