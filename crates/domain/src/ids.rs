use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Authored identifiers are human-readable slugs (`listener_study`, `desk`)
/// rather than UUIDs, because content refers to them by name in exits and rules.
macro_rules! define_key {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Runtime IDs
define_id!(SessionId);
define_id!(PlayerId);

// Authored content keys
define_key!(LocationId);
define_key!(ObjectId);
define_key!(ClueId);
define_key!(ItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = SessionId::from_uuid(uuid);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(uuid.to_string()));
    }

    #[test]
    fn location_id_works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(LocationId::from("listener_study"), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"listener_study":1}"#);

        let back: std::collections::BTreeMap<LocationId, i32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&LocationId::from("listener_study")), Some(&1));
    }
}
