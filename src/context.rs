//! Application composition root.
//!
//! [`AppContext`] wires the clients, repositories, and state managers
//! from an [`AppConfig`]. Frontends hold one context for the process
//! lifetime and pull state managers from it.

use std::sync::Arc;

use crate::auth::{IdentityClient, ProviderAuthRepository};
use crate::client::DealsClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::repository::ApiGameRepository;
use crate::usecases::{GetLatestDeals, GetStores, RegisterUser, SearchGameOffers, SignInUser};
use crate::viewmodel::{DealBrowser, SessionViewModel, StoreDirectory};

/// Wired application object graph.
#[derive(Debug)]
pub struct AppContext {
    /// Deals repository shared by all state managers.
    games: Arc<ApiGameRepository>,
    /// Session repository, the single owner of the session state.
    auth: Arc<ProviderAuthRepository>,
    /// Configuration the context was built from.
    config: AppConfig,
}

impl AppContext {
    /// Builds the object graph from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::Http`](crate::error::GameDealsError::Http)
    /// if an HTTP client fails to build.
    pub fn new(config: AppConfig) -> Result<Self> {
        let deals_client = DealsClient::builder()
            .base_url(config.deals.api_base_url.clone())
            .build()?;
        let identity_client = IdentityClient::builder()
            .api_key(config.identity.api_key.clone())
            .base_url(config.identity.base_url.clone())
            .build()?;

        Ok(Self {
            games: Arc::new(ApiGameRepository::new(deals_client, config.deals.clone())),
            auth: Arc::new(ProviderAuthRepository::new(identity_client)),
            config,
        })
    }

    /// Returns the shared deals repository.
    #[inline]
    #[must_use]
    pub fn game_repository(&self) -> Arc<ApiGameRepository> {
        Arc::clone(&self.games)
    }

    /// Returns the shared session repository.
    #[inline]
    #[must_use]
    pub fn auth_repository(&self) -> Arc<ProviderAuthRepository> {
        Arc::clone(&self.auth)
    }

    /// Creates a deal browser with the configured debounce interval.
    #[must_use]
    pub fn deal_browser(&self) -> DealBrowser<ApiGameRepository> {
        DealBrowser::new(Arc::clone(&self.games), self.config.search_debounce)
    }

    /// Creates a store directory.
    #[must_use]
    pub fn store_directory(&self) -> StoreDirectory<ApiGameRepository> {
        StoreDirectory::new(Arc::clone(&self.games))
    }

    /// Creates a session manager.
    #[must_use]
    pub fn session(&self) -> SessionViewModel<ProviderAuthRepository> {
        SessionViewModel::new(Arc::clone(&self.auth))
    }

    /// Creates the latest-deals use case.
    #[must_use]
    pub fn get_latest_deals(&self) -> GetLatestDeals<ApiGameRepository> {
        GetLatestDeals::new(Arc::clone(&self.games))
    }

    /// Creates the title-search use case.
    #[must_use]
    pub fn search_game_offers(&self) -> SearchGameOffers<ApiGameRepository> {
        SearchGameOffers::new(Arc::clone(&self.games))
    }

    /// Creates the store-catalog use case.
    #[must_use]
    pub fn get_stores(&self) -> GetStores<ApiGameRepository> {
        GetStores::new(Arc::clone(&self.games))
    }

    /// Creates the sign-in use case.
    #[must_use]
    pub fn sign_in_user(&self) -> SignInUser<ProviderAuthRepository> {
        SignInUser::new(Arc::clone(&self.auth))
    }

    /// Creates the registration use case.
    #[must_use]
    pub fn register_user(&self) -> RegisterUser<ProviderAuthRepository> {
        RegisterUser::new(Arc::clone(&self.auth))
    }
}
