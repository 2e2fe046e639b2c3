use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::ScalarValue;

/// The constraint an event places on a single variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventValue {
    /// The variable is bound to exactly one value.
    Singleton(ScalarValue),
    /// The variable ranges over its whole domain.
    ///
    /// Semantically equivalent to the variable being absent from the
    /// event; the explicit form exists so a partial assignment can be
    /// completed in place.
    WholeDomain,
}

/// A partial assignment of variables to constraints, keyed by variable name.
///
/// Absence of a key means the variable is unconstrained. Entries iterate
/// in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleEvent {
    entries: BTreeMap<String, EventValue>,
}

impl SimpleEvent {
    /// Creates an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a constraint, returning the previous one if present.
    pub fn insert(&mut self, name: impl Into<String>, value: EventValue) -> Option<EventValue> {
        self.entries.insert(name.into(), value)
    }

    /// Returns the constraint for a variable, if any.
    pub fn get(&self, name: &str) -> Option<&EventValue> {
        self.entries.get(name)
    }

    /// Returns the bound value for a variable, if it is a singleton.
    pub fn singleton(&self, name: &str) -> Option<&ScalarValue> {
        match self.entries.get(name) {
            Some(EventValue::Singleton(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true if the variable has an explicit constraint entry.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the event has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in variable-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for SimpleEvent {
    type Item = (String, EventValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, EventValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
