//! Topic resolution from aggregate names.

use std::collections::HashMap;

/// A named destination on the message transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
}

impl Topic {
    /// Creates a topic with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the topic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Maps aggregate names to destination topics.
///
/// Explicit mappings win; unmapped aggregates fall back to the
/// `{aggregate_name}.events` convention.
#[derive(Debug, Clone, Default)]
pub struct TopicResolver {
    mappings: HashMap<String, Topic>,
}

impl TopicResolver {
    /// Creates a resolver with no explicit mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an explicit aggregate-name-to-topic mapping.
    pub fn with_mapping(mut self, aggregate_name: impl Into<String>, topic: Topic) -> Self {
        self.mappings.insert(aggregate_name.into(), topic);
        self
    }

    /// Resolves the topic for an aggregate name.
    pub fn resolve(&self, aggregate_name: &str) -> Topic {
        self.mappings
            .get(aggregate_name)
            .cloned()
            .unwrap_or_else(|| Topic::new(format!("{aggregate_name}.events")))
    }
}
