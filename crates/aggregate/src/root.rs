//! The aggregate root: identity, version, router and recorder.

use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::error::AggregateError;
use crate::event::{DomainEvent, Version};
use crate::recorder::EventRecorder;
use crate::router::EventRouter;

/// State owned by an aggregate root.
///
/// Concrete aggregates keep their mutable fields in a state type
/// implementing this trait and mutate them only inside the handlers
/// they register. `Default` is the zero state replay starts from.
pub trait AggregateState: Default {
    /// Lower-case aggregate name, used by external publishers as a
    /// routing key (e.g. to resolve a topic).
    fn aggregate_name() -> &'static str;
}

/// Publication contract consumed by external event publishers.
///
/// A publisher reads [`domain_events`](Publishable::domain_events) in
/// recorder order, maps [`aggregate_name`](Publishable::aggregate_name)
/// to a destination and sends each event preserving order. Clearing is
/// an explicit step the publisher must perform by calling
/// [`clear_domain_events`](Publishable::clear_domain_events) after a
/// successful send; the core never clears on its own.
pub trait Publishable {
    /// The event type this aggregate records.
    type Event: DomainEvent;

    /// Lower-case aggregate name.
    fn aggregate_name(&self) -> &'static str;

    /// The aggregate identity rendered as a string (publication key).
    fn id_as_string(&self) -> String;

    /// Recorded events awaiting publication, oldest first.
    fn domain_events(&self) -> &[Self::Event];

    /// Empties the recorded-event buffer after a successful publish.
    fn clear_domain_events(&mut self);
}

/// Composite root of an event-sourced aggregate.
///
/// Owns the caller-supplied identity, the monotonically increasing
/// version, the domain state `S` and — exclusively — one
/// [`EventRouter`] and one [`EventRecorder`]. Concrete aggregates wrap
/// a root instead of inheriting from it: their factory constructs the
/// zero state, registers every variant handler, and applies the
/// creation event through the same [`apply_event`] path every later
/// command uses.
///
/// A single root instance must not be mutated concurrently;
/// [`apply_event`] is a multi-step sequence with no internal locking.
///
/// [`apply_event`]: AggregateRoot::apply_event
pub struct AggregateRoot<TId, S, E> {
    id: TId,
    version: Version,
    state: S,
    router: EventRouter<S, E>,
    recorder: EventRecorder<E>,
}

impl<TId, S, E> AggregateRoot<TId, S, E>
where
    S: AggregateState,
    E: DomainEvent,
{
    /// Creates a root at version 0 with zero state, no registered
    /// handlers and no recorded events.
    pub fn new(id: TId) -> Self {
        Self {
            id,
            version: Version::initial(),
            state: S::default(),
            router: EventRouter::new(),
            recorder: EventRecorder::new(),
        }
    }

    /// Installs the handler for an event variant tag.
    ///
    /// Every variant the aggregate can produce must be registered
    /// before the first [`apply_event`](AggregateRoot::apply_event)
    /// call.
    pub fn register<F>(&mut self, event_type: &'static str, handler: F)
    where
        F: Fn(&mut S, &E) + Send + Sync + 'static,
    {
        self.router.register(event_type, handler);
    }

    /// Applies a freshly constructed event to the aggregate.
    ///
    /// Advances the version, stamps it on the event, routes the event
    /// through its registered handler to mutate state, and records the
    /// stamped event for later publication. The steps are atomic from
    /// the caller's perspective: if the variant has no registered
    /// handler the call fails with
    /// [`AggregateError::NoHandlerRegistered`] and version, state and
    /// recorder are left exactly as they were.
    pub fn apply_event(&mut self, mut event: E) -> Result<(), AggregateError> {
        let next = self.version.next();
        event.set_version(next);
        // Routing resolves the handler before any mutation, so a
        // missing registration cannot leave a partial apply behind.
        self.router.route(&mut self.state, &event)?;
        self.version = next;
        tracing::trace!(
            aggregate = S::aggregate_name(),
            event_type = event.event_type(),
            version = next.as_u64(),
            "event applied"
        );
        self.recorder.record(event);
        Ok(())
    }

    /// Rebuilds state from an already published event history.
    ///
    /// Routes each event in order through the registered handlers and
    /// adopts its stamped version. Replayed events are committed facts,
    /// so they are not recorded again for publication.
    pub fn replay<I>(&mut self, events: I) -> Result<(), AggregateError>
    where
        I: IntoIterator<Item = E>,
    {
        for event in events {
            self.router.route(&mut self.state, &event)?;
            self.version = event.version();
        }
        Ok(())
    }

    /// Returns the aggregate identity.
    pub fn id(&self) -> &TId {
        &self.id
    }

    /// Returns the current version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the domain state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns true if events are recorded and not yet cleared.
    pub fn has_changes(&self) -> bool {
        !self.recorder.is_empty()
    }

    /// Returns true if every applied event is still buffered, i.e.
    /// nothing has been published and cleared yet.
    pub fn is_new(&self) -> bool {
        self.version.as_u64() == self.recorder.len() as u64
    }
}

impl<TId, S, E> AggregateRoot<TId, S, E>
where
    TId: Display,
    S: AggregateState,
    E: DomainEvent,
{
    /// Returns the identity rendered as a string.
    pub fn id_as_string(&self) -> String {
        self.id.to_string()
    }
}

impl<TId, S, E> Publishable for AggregateRoot<TId, S, E>
where
    TId: Display,
    S: AggregateState,
    E: DomainEvent,
{
    type Event = E;

    fn aggregate_name(&self) -> &'static str {
        S::aggregate_name()
    }

    fn id_as_string(&self) -> String {
        self.id.to_string()
    }

    fn domain_events(&self) -> &[E] {
        self.recorder.records()
    }

    fn clear_domain_events(&mut self) {
        self.recorder.remove_all();
    }
}

/// Equality tracks identity, not snapshot state: two roots with the
/// same id are equal regardless of version or state.
impl<TId, S, E> PartialEq for AggregateRoot<TId, S, E>
where
    TId: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<TId, S, E> Eq for AggregateRoot<TId, S, E> where TId: Eq {}

impl<TId, S, E> Hash for AggregateRoot<TId, S, E>
where
    TId: Hash,
{
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl<TId, S, E> std::fmt::Debug for AggregateRoot<TId, S, E>
where
    TId: std::fmt::Debug,
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateRoot")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("state", &self.state)
            .field("recorded", &self.recorder.len())
            .finish()
    }
}
