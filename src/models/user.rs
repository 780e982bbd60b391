//! Authenticated user session model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// An authenticated user, as reported by the identity provider.
///
/// A `User` lives for the app process or until sign-out; it is replaced
/// wholesale whenever the identity provider pushes a session change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, stable identifier of the account.
    pub uid: UserId,
    /// Account email, when the provider reports one.
    pub email: Option<String>,
    /// Display name; empty string when the account has none.
    pub display_name: String,
    /// Account creation time, falling back to "now" when the provider
    /// does not report one.
    pub created_at: DateTime<Utc>,
}
