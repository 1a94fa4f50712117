//! Trackpoint records.
//!
//! A [`Trackpoint`] is an ordered field store: field names map to string
//! values, iteration follows the order in which each field was first set,
//! and a field is never removed once present.
//!
//! Lookups ignore ASCII case. The activity-log dialect stores keys as the
//! source emits them (`AltitudeMeters`), while derived fields are computed
//! from the lowercase canonical names (`altitudemeters`), so both spellings
//! must resolve to the same entry.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// One recorded GPS sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trackpoint {
    fields: IndexMap<String, String>,
}

impl Trackpoint {
    /// Create an empty trackpoint.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields
            .get_index_of(key)
            .or_else(|| self.fields.keys().position(|k| k.eq_ignore_ascii_case(key)))
    }

    /// Set a field.
    ///
    /// A new key is appended after all existing fields. An existing key
    /// (compared without regard to ASCII case) keeps its stored spelling and
    /// position and only has its value replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => {
                if let Some((_, slot)) = self.fields.get_index_mut(idx) {
                    *slot = value;
                }
            },
            None => {
                self.fields.insert(key, value);
            },
        }
    }

    /// Get a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key)
            .and_then(|idx| self.fields.get_index(idx))
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Trackpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", k, v)?;
        }
        write!(f, "}}")
    }
}
