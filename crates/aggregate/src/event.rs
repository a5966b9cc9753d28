use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Version number stamped on an aggregate and on each of its events.
///
/// Versions start at 0 for a freshly constructed aggregate and
/// increment by exactly 1 per applied event. The version is the
/// expected compare-and-swap token for optimistic concurrency at the
/// persistence layer; the core itself performs no I/O.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) of a new aggregate and of an
    /// event that has not been stamped yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the version (1) produced by the creation event.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// Trait for domain events.
///
/// Domain events are immutable facts describing one committed state
/// transition, named in past tense. Each concrete event shape carries
/// a stable variant tag used both for in-process routing and for wire
/// serialization, and the version it produced on its aggregate.
///
/// The version is write-once by contract: it is
/// [`Version::initial()`] at construction and is stamped exactly once
/// by the owning aggregate root at apply time. Nothing else may call
/// [`set_version`](DomainEvent::set_version).
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Returns the stable variant tag of this event.
    fn event_type(&self) -> &'static str;

    /// Returns the aggregate version this event produced.
    fn version(&self) -> Version;

    /// Stamps the version this event produced. Reserved for the
    /// owning aggregate root.
    fn set_version(&mut self, version: Version);
}
