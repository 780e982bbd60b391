//! Raw account record from the identity provider.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{User, UserId};

/// Account record as returned by the identity provider's lookup
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    /// Provider-assigned stable account identifier.
    pub local_id: String,
    /// Account email, when present.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, when the account has one.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Account creation time as milliseconds since the epoch,
    /// transmitted as a string.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AccountDto {
    /// Normalizes this record into a domain [`User`].
    ///
    /// A missing display name becomes the empty string. A missing or
    /// unparsable creation time falls back to the current instant.
    #[must_use]
    pub fn into_user(self) -> User {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|millis| millis.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_else(Utc::now);

        User {
            uid: UserId::new(self.local_id),
            email: self.email,
            display_name: self.display_name.unwrap_or_default(),
            created_at,
        }
    }
}
