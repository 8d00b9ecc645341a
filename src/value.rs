//! Tri-state values for partial updates.
//!
//! A PATCH request must tell three cases apart for every field: leave it
//! alone, clear it, or set it. [`TriState`] carries that distinction through
//! serde.
//!
//! # Example
//!
//! ```rust
//! use scalr_api::TriState;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Update {
//!     #[serde(skip_serializing_if = "TriState::is_unset")]
//!     name: TriState<String>,
//!     #[serde(skip_serializing_if = "TriState::is_unset")]
//!     description: TriState<String>,
//!     #[serde(skip_serializing_if = "TriState::is_unset")]
//!     auto_apply: TriState<bool>,
//! }
//!
//! let update = Update {
//!     name: "network".into(),
//!     description: TriState::Null,
//!     auto_apply: TriState::Unset,
//! };
//!
//! assert_eq!(
//!     serde_json::to_string(&update).unwrap(),
//!     r#"{"name":"network","description":null}"#
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is unset, explicitly null, or set.
///
/// Pair with `#[serde(default, skip_serializing_if = "TriState::is_unset")]`
/// so that an unset field is omitted on serialization and an absent field
/// deserializes as [`TriState::Unset`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriState<T> {
    /// The field is omitted.
    Unset,
    /// The field is sent as `null`.
    Null,
    /// The field is sent with a value.
    Value(T),
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for TriState<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> TriState<T> {
    /// Converts an `Option`, mapping `None` to [`TriState::Null`].
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }

    /// Returns `true` if the value is [`TriState::Unset`].
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns `true` if the value is [`TriState::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the field will be sent, either as a value or null.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !self.is_unset()
    }

    /// Returns the contained value, if any.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Converts into the contained value, if any.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Borrows the contained value.
    #[must_use]
    pub const fn as_ref(&self) -> TriState<&T> {
        match self {
            Self::Unset => TriState::Unset,
            Self::Null => TriState::Null,
            Self::Value(value) => TriState::Value(value),
        }
    }

    /// Maps the contained value, keeping `Unset` and `Null`.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> TriState<U> {
        match self {
            Self::Unset => TriState::Unset,
            Self::Null => TriState::Null,
            Self::Value(value) => TriState::Value(f(value)),
        }
    }
}

impl<T> From<T> for TriState<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for TriState<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl<T: Serialize> Serialize for TriState<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Unset | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for TriState<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
