//! HTTP client for the identity provider's public API.

use crate::config::IdentityConfig;
use crate::error::IdentityError;
use gatehouse_core::{Result, SessionToken};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Header carrying a session token on introspection calls.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// Identity provider client.
///
/// Wraps a single `reqwest::Client`, whose connection pool opens
/// connections on first use and reuses them across concurrent requests.
/// Construct one at startup and share it; there is no explicit close.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

/// A fully buffered provider response.
#[derive(Debug)]
pub struct ProviderResponse {
    endpoint: String,
    status: StatusCode,
    body: String,
}

impl IdentityClient {
    /// Creates a client for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| IdentityError::ClientSetup {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.public_url().to_string(),
        })
    }

    /// Issues a GET against `path`.
    pub async fn get(&self, path: &str) -> Result<ProviderResponse, IdentityError> {
        self.send(path, self.http.get(self.url(path))).await
    }

    /// Issues a GET against `path` authenticated with a session token.
    pub async fn get_with_session_token(
        &self,
        path: &str,
        token: &SessionToken,
    ) -> Result<ProviderResponse, IdentityError> {
        let request = self
            .http
            .get(self.url(path))
            .header(SESSION_TOKEN_HEADER, token.expose());
        self.send(path, request).await
    }

    /// Issues a POST of a JSON body against `path` with query parameters.
    pub async fn post_json<B>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<ProviderResponse, IdentityError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).query(query).json(body);
        self.send(path, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ProviderResponse, IdentityError> {
        let unavailable = |e: reqwest::Error| IdentityError::Unavailable {
            endpoint: path.to_string(),
            reason: e.to_string(),
        };

        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(unavailable)?;

        debug!(endpoint = path, status = status.as_u16(), "identity provider responded");

        Ok(ProviderResponse {
            endpoint: path.to_string(),
            status,
            body,
        })
    }
}

impl ProviderResponse {
    /// Returns the response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Fails with [`IdentityError::UpstreamStatus`] unless the status is 2xx.
    pub fn require_success(self) -> Result<Self, IdentityError> {
        if !self.status.is_success() {
            return Err(IdentityError::UpstreamStatus {
                endpoint: self.endpoint,
                status: self.status.as_u16(),
            }
            .into());
        }
        Ok(self)
    }

    /// Decodes the body into a typed payload.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, IdentityError> {
        serde_json::from_str(&self.body).map_err(|e| {
            IdentityError::InvalidPayload {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
