//! Per-session narrative state for interactable objects.
//!
//! Flags are scoped by `(LocationId, ObjectId)` and stored sparsely: reading a
//! path that was never written yields `None` (or `false` for boolean checks),
//! and writing creates the intermediate levels on demand. Flag names are free
//! strings so new content can introduce flags without touching this type.
//!
//! Serialized shape (embedded in the session document):
//!
//! ```json
//! { "listener_study": { "desk": { "drawer_found": true } } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, ObjectId};

/// A single flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The flag bag for one object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectFlags(BTreeMap<String, FlagValue>);

impl ObjectFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(FlagValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FlagValue::as_int)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FlagValue::as_text)
    }

    /// Returns the previous value, if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Option<FlagValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Sparse `location -> object -> flags` store embedded in a session.
///
/// Entries are never pruned for the lifetime of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectStateTracker(BTreeMap<LocationId, BTreeMap<ObjectId, ObjectFlags>>);

impl ObjectStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a (possibly empty) entry exists for `location`.
    ///
    /// Returns `true` if the entry was created by this call.
    pub fn ensure_location(&mut self, location: &LocationId) -> bool {
        if self.0.contains_key(location) {
            return false;
        }
        self.0.insert(location.clone(), BTreeMap::new());
        true
    }

    pub fn has_location(&self, location: &LocationId) -> bool {
        self.0.contains_key(location)
    }

    pub fn flags(&self, location: &LocationId, object: &ObjectId) -> Option<&ObjectFlags> {
        self.0.get(location).and_then(|objects| objects.get(object))
    }

    /// Mutable access to an object's flags, creating both levels if needed.
    pub fn flags_mut(&mut self, location: &LocationId, object: &ObjectId) -> &mut ObjectFlags {
        self.0
            .entry(location.clone())
            .or_default()
            .entry(object.clone())
            .or_default()
    }

    pub fn get(&self, location: &LocationId, object: &ObjectId, key: &str) -> Option<&FlagValue> {
        self.flags(location, object).and_then(|flags| flags.get(key))
    }

    pub fn set(
        &mut self,
        location: &LocationId,
        object: &ObjectId,
        key: impl Into<String>,
        value: impl Into<FlagValue>,
    ) -> Option<FlagValue> {
        self.flags_mut(location, object).set(key, value)
    }

    /// `true` only if the flag exists and holds `Bool(true)`.
    pub fn flag_is_set(&self, location: &LocationId, object: &ObjectId, key: &str) -> bool {
        self.flags(location, object)
            .and_then(|flags| flags.get_bool(key))
            .unwrap_or(false)
    }

    pub fn set_flag(&mut self, location: &LocationId, object: &ObjectId, key: impl Into<String>) {
        self.set(location, object, key, true);
    }
}
