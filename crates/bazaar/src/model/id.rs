//! Type-safe identifiers.
//!
//! Every resource ID wraps the `u32` handed out by its actor. IDs render as
//! `<prefix>_<n>` (e.g. `item_3`), travel over JSON as that string, and parse
//! back from either the prefixed form or the bare number.

use thiserror::Error;

/// A string that is not a valid ID for the expected resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed {kind} id: {value:?}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub const PREFIX: &'static str = $prefix;
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s
                    .strip_prefix($prefix)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .unwrap_or(s);
                // u32::from_str accepts a leading '+', which is not an ID
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseIdError {
                        kind: $prefix,
                        value: s.to_string(),
                    });
                }
                digits.parse().map(Self).map_err(|_| ParseIdError {
                    kind: $prefix,
                    value: s.to_string(),
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

resource_id!(
    /// Identifies a registered user.
    UserId,
    "user"
);
resource_id!(
    /// Identifies a listed item.
    ItemId,
    "item"
);
resource_id!(
    /// Identifies a login session. Not secret; the session token is.
    SessionId,
    "session"
);
