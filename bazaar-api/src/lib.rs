pub mod credentials;
pub mod endpoints;
mod envelope;
mod error;
mod macros;
pub mod repositories;

pub use crate::credentials::{CredentialKey, CredentialStore, Credentials, MemoryCredentialStore};
pub use crate::endpoints::{Method, RawRequest, TokenPair};
pub use crate::envelope::{COMPLETED_SENTINEL, Envelope};
pub use crate::error::ApiError;

use endpoints::Request as ApiRequest;
use endpoints::auth::RefreshToken;
use repositories::*;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Token-aware client for the marketplace backend.
///
/// Every call resolves to an [`Envelope`]. A `401` on the first attempt
/// triggers one silent refresh through `/auth/refresh-token` using the
/// credentials in the store; if that yields new tokens the original request is
/// retried exactly once with the new access token.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl Client {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url).store(store).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Send a typed request.
    pub async fn call<R>(&self, request: &R, token: Option<&str>) -> Envelope
    where
        R: ApiRequest,
    {
        let body = match request.body().map(serde_json::to_value).transpose() {
            Ok(body) => body,
            Err(err) => {
                let err = ApiError::from(err);
                warn!(endpoint = %request.endpoint(), error = %err, "API request not sent");
                return Envelope::from(Err(err));
            }
        };

        self.send(&request.endpoint(), R::METHOD, body.as_ref(), token)
            .await
    }

    /// Send an untyped request descriptor.
    pub async fn send_raw(&self, request: &RawRequest) -> Envelope {
        self.send(
            &request.endpoint,
            request.method,
            request.body.as_ref(),
            request.token.as_deref(),
        )
        .await
    }

    pub async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Envelope {
        let outcome = match self.dispatch(endpoint, method, body, token).await {
            Err(err) if err.is_unauthorized() => {
                self.refresh_and_retry(endpoint, method, body).await
            }
            outcome => outcome,
        };

        if let Err(err) = &outcome {
            warn!(%method, endpoint, error = %err, "API request failed");
        }

        Envelope::from(outcome)
    }

    async fn refresh_and_retry(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        info!(%method, endpoint, "request unauthorized, refreshing access token");

        let tokens = match self.refresh().await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                return Err(ApiError::Unauthorized);
            }
        };

        info!(%method, endpoint, "token refreshed, retrying request");
        self.dispatch(endpoint, method, body, Some(&tokens.access_token))
            .await
    }

    /// Exchange the stored refresh token for a new pair and persist it.
    async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let request = RefreshToken::new(
            self.store.get(CredentialKey::UserId),
            self.store.get(CredentialKey::RefreshToken),
        );
        let body = serde_json::to_value(&request)?;

        let data = self
            .dispatch(&request.endpoint(), RefreshToken::METHOD, Some(&body), None)
            .await?;
        let tokens = TokenPair::from_body(&data).ok_or(ApiError::MissingTokens)?;

        self.store
            .set(CredentialKey::AccessToken, &tokens.access_token);
        self.store
            .set(CredentialKey::RefreshToken, &tokens.refresh_token);

        Ok(tokens)
    }

    /// One round trip, no refresh.
    async fn dispatch(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut builder = self
            .http
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        // A literal `null` body is not sent
        if let Some(body) = body.filter(|body| !body.is_null()) {
            builder = builder.json(body);
        }

        debug!(%method, %url, authenticated = token.is_some(), "sending API request");
        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, %url, %status, "received API response");

        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(envelope::completed_payload());
        }

        // Unreadable or non-JSON bodies count as empty.
        let data = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            Err(err) => {
                debug!(%url, error = %err, "failed to read response body");
                Value::Null
            }
        };

        if data.is_null() {
            Ok(envelope::completed_payload())
        } else {
            Ok(data)
        }
    }
}

pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    store: Option<Arc<dyn CredentialStore>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            store: None,
        }
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Without an explicit store the client keeps credentials in memory.
    pub fn build(self) -> Result<Client, ApiError> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        let store: Arc<dyn CredentialStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryCredentialStore::new()),
        };

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }
}

pub struct Request;

impl Request {
    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }

    pub fn categories() -> CategoryRepository {
        CategoryRepository::new()
    }

    pub fn shops() -> ShopRepository {
        ShopRepository::new()
    }

    pub fn products() -> ProductRepository {
        ProductRepository::new()
    }

    pub fn cart(cart_id: impl Into<String>) -> CartRepository {
        CartRepository::new().with_cart(cart_id)
    }
}
