//! Static configuration for the external sources.
//!
//! All values here are non-secret-rotating endpoint configuration; the
//! identity API key is the one secret and is wrapped in
//! [`secrecy::SecretString`].

use core::time::Duration;

use secrecy::SecretString;

/// Base URL for the deals REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://www.cheapshark.com/api/1.0";

/// Base URL for purchase-redirect link construction.
pub const DEFAULT_REDIRECT_BASE_URL: &str = "https://www.cheapshark.com/redirect";

/// Host prepended to relative store image paths.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://www.cheapshark.com";

/// Base URL for the hosted identity provider's REST surface.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Fixed page size requested from the recent-deals endpoint.
pub const DEALS_PAGE_SIZE: u32 = 30;

/// Default quiet interval before a typed search term goes remote.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Endpoint configuration for the deals source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealsConfig {
    /// REST API base URL.
    pub api_base_url: String,
    /// Redirect base URL used when deriving purchase links.
    pub redirect_base_url: String,
    /// Host for relative image paths.
    pub image_base_url: String,
}

impl Default for DealsConfig {
    #[inline]
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            redirect_base_url: DEFAULT_REDIRECT_BASE_URL.to_owned(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_owned(),
        }
    }
}

/// Endpoint configuration for the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Identity provider base URL.
    pub base_url: String,
    /// Project API key sent as a query parameter on every call.
    pub api_key: SecretString,
}

impl IdentityConfig {
    /// Creates an identity configuration for the production endpoint.
    #[inline]
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_IDENTITY_BASE_URL.to_owned(),
            api_key,
        }
    }
}

/// Full application configuration consumed by
/// [`AppContext`](crate::context::AppContext).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deals source endpoints.
    pub deals: DealsConfig,
    /// Identity provider endpoints and key.
    pub identity: IdentityConfig,
    /// Search debounce interval.
    pub search_debounce: Duration,
}

impl AppConfig {
    /// Creates a configuration with production endpoints and the default
    /// debounce interval.
    #[inline]
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            deals: DealsConfig::default(),
            identity: IdentityConfig::new(api_key),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}
