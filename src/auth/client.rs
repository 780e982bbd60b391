//! HTTP client for the hosted identity provider.
//!
//! The provider exposes keyed REST endpoints for email/password
//! sign-in, registration, profile updates, and account lookup. Every
//! failure body carries a reason code which is preserved verbatim on
//! the mapped error variant.

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_IDENTITY_BASE_URL;
use crate::dto::AccountDto;
use crate::error::{GameDealsError, Result};

/// Email/password sign-in endpoint path.
const SIGN_IN_PATH: &str = "/accounts:signInWithPassword";

/// Account-creation endpoint path.
const SIGN_UP_PATH: &str = "/accounts:signUp";

/// Profile-update endpoint path.
const UPDATE_PATH: &str = "/accounts:update";

/// Account-metadata lookup endpoint path.
const LOOKUP_PATH: &str = "/accounts:lookup";

/// Credentials payload for sign-in and sign-up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    /// Account email.
    email: &'a str,
    /// Account password.
    password: &'a str,
    /// Ask the provider for a session token in the response.
    return_secure_token: bool,
}

/// Display-name update payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    /// Session token identifying the account to update.
    id_token: &'a str,
    /// New display name.
    display_name: &'a str,
    /// No refreshed token needed for a profile update.
    return_secure_token: bool,
}

/// Account lookup payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    /// Session token identifying the account to look up.
    id_token: &'a str,
}

/// Token-bearing response of the sign-in and sign-up endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    /// Provider-assigned stable account identifier.
    local_id: String,
    /// Short-lived session token for follow-up calls.
    id_token: String,
    /// Account email, when reported.
    #[serde(default)]
    email: Option<String>,
    /// Display name, when the account has one.
    #[serde(default)]
    display_name: Option<String>,
}

/// Response of the lookup endpoint.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    /// Matching account records (at most one for a token lookup).
    #[serde(default)]
    users: Vec<AccountDto>,
}

/// Error envelope the provider wraps around failure responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    /// Error detail.
    error: ProviderErrorDetail,
}

/// Inner error detail with the reason code.
#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    /// Reason code, e.g. `EMAIL_NOT_FOUND`. May carry a suffix after
    /// the code token.
    #[serde(default)]
    message: String,
}

/// Maps a provider failure message to the error taxonomy.
///
/// The first whitespace-separated token of the message is the reason
/// code and is preserved on the variant.
fn map_provider_error(status: u16, message: &str) -> GameDealsError {
    let code = message
        .split_whitespace()
        .next()
        .unwrap_or("UNKNOWN")
        .to_owned();
    match code.as_str() {
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            GameDealsError::InvalidCredentials { code }
        }
        "EMAIL_NOT_FOUND" => GameDealsError::AccountNotFound { code },
        "EMAIL_EXISTS" => GameDealsError::EmailAlreadyInUse { code },
        _ => GameDealsError::AuthProvider {
            code,
            message: format!("status {status}: {message}"),
        },
    }
}

/// Builder for constructing an [`IdentityClient`].
#[derive(Debug, Default)]
pub struct IdentityClientBuilder {
    /// Project API key.
    api_key: Option<SecretString>,
    /// Base URL override (for testing).
    base_url: Option<String>,
}

impl IdentityClientBuilder {
    /// Sets the project API key attached to every call.
    #[inline]
    #[must_use]
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

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
    /// Returns [`GameDealsError::InvalidInput`] if no API key was
    /// provided, or [`GameDealsError::Http`] if the HTTP client fails
    /// to build.
    #[inline]
    pub fn build(self) -> Result<IdentityClient> {
        let api_key = self
            .api_key
            .ok_or(GameDealsError::InvalidInput("identity API key is required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_owned());
        let http = reqwest::Client::builder().build()?;

        Ok(IdentityClient {
            http,
            api_key,
            base_url,
        })
    }
}

/// Async client for the identity provider's REST surface.
///
/// Use [`IdentityClient::builder()`] to construct an instance.
#[derive(Debug)]
pub struct IdentityClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Project API key.
    api_key: SecretString,
    /// Provider base URL.
    base_url: String,
}

impl IdentityClient {
    /// Creates a new builder for configuring the client.
    #[inline]
    #[must_use]
    pub fn builder() -> IdentityClientBuilder {
        IdentityClientBuilder::default()
    }

    /// Exchanges credentials for the account record.
    ///
    /// Performs the password sign-in followed by a metadata lookup so
    /// the returned record carries the display name and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::InvalidCredentials`],
    /// [`GameDealsError::AccountNotFound`], or
    /// [`GameDealsError::AuthProvider`] depending on the provider's
    /// reason code, or a transport/serialization error.
    #[tracing::instrument(skip_all)]
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<AccountDto> {
        tracing::debug!("signing in");
        let token: TokenResponse = self
            .post_json(
                SIGN_IN_PATH,
                &CredentialsRequest {
                    email,
                    password: password.expose_secret(),
                    return_secure_token: true,
                },
            )
            .await?;
        self.account_for_token(token).await
    }

    /// Creates a new account, optionally setting a display name.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::EmailAlreadyInUse`] or
    /// [`GameDealsError::AuthProvider`] depending on the provider's
    /// reason code, or a transport/serialization error.
    #[tracing::instrument(skip_all)]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        display_name: Option<&str>,
    ) -> Result<AccountDto> {
        tracing::debug!("registering account");
        let token: TokenResponse = self
            .post_json(
                SIGN_UP_PATH,
                &CredentialsRequest {
                    email,
                    password: password.expose_secret(),
                    return_secure_token: true,
                },
            )
            .await?;

        if let Some(name) = display_name {
            let _updated: TokenResponse = self
                .post_json(
                    UPDATE_PATH,
                    &UpdateProfileRequest {
                        id_token: &token.id_token,
                        display_name: name,
                        return_secure_token: false,
                    },
                )
                .await?;
        }

        self.account_for_token(token).await
    }

    /// Resolves the account record behind a session token, falling
    /// back to the token response fields when the lookup comes back
    /// empty.
    async fn account_for_token(&self, token: TokenResponse) -> Result<AccountDto> {
        let lookup: LookupResponse = self
            .post_json(
                LOOKUP_PATH,
                &LookupRequest {
                    id_token: &token.id_token,
                },
            )
            .await?;

        Ok(lookup.users.into_iter().next().unwrap_or(AccountDto {
            local_id: token.local_id,
            email: token.email,
            display_name: token.display_name,
            created_at: None,
        }))
    }

    /// Sends a keyed JSON POST request and deserializes the response,
    /// mapping provider failure bodies to the error taxonomy.
    #[tracing::instrument(skip_all, fields(path = %path))]
    async fn post_json<Req: Serialize + Sync, Resp: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "sending POST request");
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(GameDealsError::from)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_owned());
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .map_or(body, |envelope| envelope.error.message);
            tracing::debug!(status = status.as_u16(), message = %message, "provider error");
            Err(map_provider_error(status.as_u16(), &message))
        }
    }
}
