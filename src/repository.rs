//! Repository layer over the deals source.
//!
//! Translates raw source records into domain models. Batches are
//! atomic: a single malformed record fails the whole call rather than
//! silently dropping it.

use crate::client::DealsClient;
use crate::config::DealsConfig;
use crate::error::Result;
use crate::models::{Deal, Store};

/// Abstraction over the deals source.
pub trait GameRepository: Send + Sync {
    /// Fetches the most recent deals page.
    fn latest_deals(&self) -> impl Future<Output = Result<Vec<Deal>>> + Send;

    /// Searches games by title and returns their best offers as deals.
    fn search_game(&self, title: &str) -> impl Future<Output = Result<Vec<Deal>>> + Send;

    /// Fetches the store catalog.
    fn stores(&self) -> impl Future<Output = Result<Vec<Store>>> + Send;
}

/// [`GameRepository`] backed by the hosted deals API.
#[derive(Debug)]
pub struct ApiGameRepository {
    /// Deals API client.
    client: DealsClient,
    /// Normalization settings (redirect and image hosts).
    config: DealsConfig,
}

impl ApiGameRepository {
    /// Creates a repository over the given client and settings.
    #[inline]
    #[must_use]
    pub const fn new(client: DealsClient, config: DealsConfig) -> Self {
        Self { client, config }
    }
}

impl GameRepository for ApiGameRepository {
    fn latest_deals(&self) -> impl Future<Output = Result<Vec<Deal>>> + Send {
        async move {
            let records = self.client.recent_deals().await?;
            records
                .into_iter()
                .map(|record| record.into_deal(&self.config))
                .collect()
        }
    }

    fn search_game(&self, title: &str) -> impl Future<Output = Result<Vec<Deal>>> + Send {
        async move {
            let records = self.client.search_games(title).await?;
            records
                .into_iter()
                .map(|record| record.into_deal(&self.config))
                .collect()
        }
    }

    fn stores(&self) -> impl Future<Output = Result<Vec<Store>>> + Send {
        async move {
            let records = self.client.stores().await?;
            Ok(records
                .into_iter()
                .map(|record| record.into_store(&self.config))
                .collect())
        }
    }
}
