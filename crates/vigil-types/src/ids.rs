//! Strongly-typed identifier wrappers to prevent accidental misuse of strings.
//!
//! Both the session race guard and the alert subscription race guard key on
//! these ids; dedicated types keep a patient id from being compared against
//! an arbitrary string.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        /// Uses `Arc<str>` internally so cloning is an atomic increment
        /// instead of a heap allocation.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Create a new id from any string-like value.
            pub fn new(value: impl Into<Arc<str>>) -> Self {
                Self(value.into())
            }

            /// Borrow as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::new(s))
            }
        }
    };
}

id_type! {
    /// Identifier assigned by the identity provider to a signed-in principal.
    IdentityId
}

id_type! {
    /// Identifier of the patient whose alert collection is being mirrored.
    PatientId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_compare_by_value() {
        assert_eq!(IdentityId::from("u1"), IdentityId::new("u1".to_string()));
        assert_ne!(PatientId::from("p1"), PatientId::from("p2"));
    }

    #[test]
    fn id_serde_is_transparent() {
        let id = PatientId::from("p-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-42\"");
        let back: PatientId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
