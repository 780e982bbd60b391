//! HTTP client for the deals REST source.

use crate::config::{DEALS_PAGE_SIZE, DEFAULT_API_BASE_URL};
use crate::dto::{DealDto, GameSearchDto, StoreDto};
use crate::error::{GameDealsError, Result};

/// Recent-deals endpoint path.
const DEALS_PATH: &str = "/deals";

/// Title-search endpoint path.
const GAMES_PATH: &str = "/games";

/// Store-directory endpoint path.
const STORES_PATH: &str = "/stores";

/// Builder for constructing a [`DealsClient`].
#[derive(Debug, Default)]
pub struct DealsClientBuilder {
    /// Base URL override (for testing).
    base_url: Option<String>,
}

impl DealsClientBuilder {
    /// Overrides the base URL (useful for testing with a mock server).
    #[inline]
    #[must_use]
    pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::Http`] if the HTTP client fails to
    /// build.
    #[inline]
    pub fn build(self) -> Result<DealsClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let http = reqwest::Client::builder().build()?;

        Ok(DealsClient { http, base_url })
    }
}

/// Async client for the deals REST source.
///
/// The source is public and stateless; no authentication is attached.
/// Use [`DealsClient::builder()`] to construct an instance.
#[derive(Debug)]
pub struct DealsClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// API base URL.
    base_url: String,
}

impl DealsClient {
    /// Creates a new builder for configuring the client.
    #[inline]
    #[must_use]
    pub fn builder() -> DealsClientBuilder {
        DealsClientBuilder::default()
    }

    /// Fetches the fixed-size recent-deals page via `GET /deals`.
    ///
    /// Records are returned in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the source returns a
    /// non-success status, or the response cannot be deserialized.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn recent_deals(&self) -> Result<Vec<DealDto>> {
        let page_size = DEALS_PAGE_SIZE.to_string();
        tracing::debug!(page_size = %page_size, "fetching recent deals");
        self.get_json(DEALS_PATH, &[("sortBy", "recent"), ("pageSize", &page_size)])
            .await
    }

    /// Searches games by title via `GET /games`.
    ///
    /// The title is percent-encoded by the query serializer. A search
    /// with zero matches yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the source returns a
    /// non-success status, or the response cannot be deserialized.
    #[inline]
    #[tracing::instrument(skip_all, fields(title = %title))]
    pub async fn search_games(&self, title: &str) -> Result<Vec<GameSearchDto>> {
        self.get_json(GAMES_PATH, &[("title", title)]).await
    }

    /// Fetches the full store directory via `GET /stores`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the source returns a
    /// non-success status, or the response cannot be deserialized.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn stores(&self) -> Result<Vec<StoreDto>> {
        self.get_json(STORES_PATH, &[]).await
    }

    /// Sends a GET request and deserializes the JSON response.
    #[tracing::instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "sending GET request");
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");
        if status.is_success() {
            let body = response.text().await?;
            tracing::trace!(body_len = body.len(), "parsing response body");
            serde_json::from_str(&body).map_err(GameDealsError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_owned());
            tracing::debug!(status = status.as_u16(), message = %message, "source error");
            Err(GameDealsError::Source {
                status: status.as_u16(),
                message,
            })
        }
    }
}
