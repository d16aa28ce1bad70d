//! Typed identifier newtypes backed by stable catalog slugs.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a slug such as `"living-room"`.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the inner slug.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the slug is empty (never valid in a catalog).
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
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

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Unique identifier for a [`Room`](crate::room::Room).
    RoomId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_inner_slug() {
        let id = DeviceId::new("light-1");
        assert_eq!(id.to_string(), "light-1");
    }

    #[test]
    fn should_compare_with_plain_str() {
        let id = RoomId::from("kitchen");
        assert_eq!(id, "kitchen");
        assert!(id == *"kitchen");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = RoomId::new("bedroom");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bedroom\"");
        let parsed: RoomId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_lookup_hash_map_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(DeviceId::new("tv-1"), 1);
        assert_eq!(map.get("tv-1"), Some(&1));
    }

    #[test]
    fn should_report_empty_slug() {
        assert!(DeviceId::new("").is_empty());
        assert!(!DeviceId::new("ac-1").is_empty());
    }
}
