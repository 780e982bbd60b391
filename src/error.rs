//! Error types for the game deals client library.

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, GameDealsError>;

/// All errors that can occur when using the game deals client.
#[derive(Debug, thiserror::Error)]
pub enum GameDealsError {
    /// HTTP transport failure (connection, timeout, TLS, …).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The deals source answered with a non-success status.
    ///
    /// The attached message is diagnostic only; callers must not branch
    /// on its content.
    #[error("deals source error: status {status}: {message}")]
    Source {
        /// HTTP status code returned by the source.
        status: u16,
        /// Response body or a placeholder when the body was unreadable.
        message: String,
    },

    /// A fetched record failed normalization.
    ///
    /// One malformed record fails the whole batch; partial entities are
    /// never produced.
    #[error("malformed record: field `{field}` has unparsable value `{value}`")]
    MalformedRecord {
        /// Name of the offending field in the source record.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A use-case precondition failed before any network call.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The identity provider rejected the supplied password.
    #[error("invalid credentials")]
    InvalidCredentials {
        /// Raw provider reason code, preserved for logging and tests.
        code: String,
    },

    /// The identity provider knows no account for the supplied email.
    #[error("account not found")]
    AccountNotFound {
        /// Raw provider reason code, preserved for logging and tests.
        code: String,
    },

    /// Registration failed because the email is already taken.
    #[error("email already in use")]
    EmailAlreadyInUse {
        /// Raw provider reason code, preserved for logging and tests.
        code: String,
    },

    /// Any other identity-provider failure.
    #[error("auth provider error: {message}")]
    AuthProvider {
        /// Raw provider reason code, preserved for logging and tests.
        code: String,
        /// Diagnostic message reported by the provider.
        message: String,
    },
}

impl GameDealsError {
    /// Returns the raw identity-provider reason code, if this error
    /// originated from the identity provider.
    #[inline]
    #[must_use]
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { code }
            | Self::AccountNotFound { code }
            | Self::EmailAlreadyInUse { code }
            | Self::AuthProvider { code, .. } => Some(code),
            Self::Http(_)
            | Self::Serialization(_)
            | Self::Source { .. }
            | Self::MalformedRecord { .. }
            | Self::InvalidInput(_) => None,
        }
    }
}
