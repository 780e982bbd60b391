//! Newtype wrappers for entity identifiers.
//!
//! These prevent accidentally mixing up IDs of different entity types
//! at compile time. All identifiers in the deals and identity sources
//! are opaque strings.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapping a `String` inner type.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given string.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_string_id! {
    /// Unique identifier for a deal.
    ///
    /// Deal IDs from the listing endpoint are provider-opaque strings;
    /// deals synthesized from search results carry a `SEARCH-` prefixed
    /// game ID to avoid collisions.
    DealId
}

define_string_id! {
    /// Unique identifier for a game.
    GameId
}

define_string_id! {
    /// Unique identifier for a store. The sentinel `"0"` means the
    /// store is unknown.
    StoreId
}

define_string_id! {
    /// Unique, stable identifier for an authenticated user account.
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_id_serde_roundtrip() {
        let id = DealId::new("X8oqm622hdb%2F".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""X8oqm622hdb%2F""#);
        let deserialized: DealId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn store_id_display() {
        let id = StoreId::new("1".to_owned());
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn id_from_inner() {
        let id: GameId = "612".into();
        assert_eq!(id.as_inner(), "612");

        let id: UserId = "abc".to_owned().into();
        assert_eq!(id.as_inner(), "abc");
    }

    #[test]
    fn id_into_inner() {
        let id = DealId::new("d-1".to_owned());
        assert_eq!(id.into_inner(), "d-1");
    }

    #[test]
    fn different_id_types_are_distinct() {
        let _deal = DealId::new("1".to_owned());
        let _game = GameId::new("1".to_owned());
        let _store = StoreId::new("1".to_owned());
    }
}
