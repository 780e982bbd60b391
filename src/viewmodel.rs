//! Reactive state managers for interactive frontends.
//!
//! Each manager owns a snapshot published through a watch channel.
//! Frontends subscribe to the channel and re-render on change;
//! commands mutate the snapshot through the single owning manager.

mod browse;
mod session;
mod stores;

pub use browse::{BrowseSnapshot, DealBrowser};
pub use session::{SessionSnapshot, SessionState, SessionViewModel};
pub use stores::{StoreDirectory, StoresSnapshot};

use crate::error::GameDealsError;

/// Converts an error into a message suitable for direct display.
///
/// This is the only place errors are turned into user-facing text.
/// Raw provider reason codes never surface here; they stay on the
/// error for logging.
#[must_use]
pub fn user_message(error: &GameDealsError) -> String {
    match error {
        GameDealsError::InvalidCredentials { .. } => "Incorrect email or password.".to_owned(),
        GameDealsError::AccountNotFound { .. } => "No account exists for that email.".to_owned(),
        GameDealsError::EmailAlreadyInUse { .. } => "That email is already in use.".to_owned(),
        GameDealsError::AuthProvider { .. } => {
            "Something went wrong signing you in. Please try again.".to_owned()
        }
        GameDealsError::InvalidInput(message) => (*message).to_owned(),
        GameDealsError::Http(_) | GameDealsError::Source { .. } => {
            "Could not reach the deals service. Check your connection and try again.".to_owned()
        }
        GameDealsError::Serialization(_) | GameDealsError::MalformedRecord { .. } => {
            "The deals service returned unexpected data. Please try again later.".to_owned()
        }
    }
}
