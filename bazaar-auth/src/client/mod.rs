mod config;
mod session_store;

pub use config::Settings;
pub use session_store::SessionStore;

use crate::error::AuthError;
use bazaar_api::endpoints::auth::LoginResponse;
use bazaar_api::{Client, CredentialKey, CredentialStore, Envelope, Request, TokenPair};
use serde_json::Value;
use std::sync::Arc;

/// Build a client from settings, backed by the persisted session store.
pub fn connect(settings: &Settings) -> Result<(Arc<Client>, Arc<SessionStore>), AuthError> {
    settings.validate().map_err(AuthError::Configuration)?;

    let store = Arc::new(match &settings.session_file {
        Some(path) => SessionStore::at(path)?,
        None => SessionStore::new()?,
    });

    let client = Client::builder()
        .base_url(settings.base_url.clone())
        .timeout(settings.timeout())
        .store(store.clone())
        .build()?;

    tracing::info!(
        base_url = %client.base_url(),
        session = %store.path().display(),
        "API client ready"
    );

    Ok((Arc::new(client), store))
}

/// Login, logout and manual refresh, keeping the credential store in step
/// with what the backend hands out.
pub struct AuthSession {
    client: Arc<Client>,
}

impl AuthSession {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn store(&self) -> &Arc<dyn CredentialStore> {
        self.client.store()
    }

    pub fn access_token(&self) -> Option<String> {
        self.store().get(CredentialKey::AccessToken)
    }

    pub fn user_id(&self) -> Option<String> {
        self.store().get(CredentialKey::UserId)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub async fn login(&self, phone: &str, password: &str) -> Envelope {
        let envelope = self
            .client
            .call(&Request::auth().login(phone, password), None)
            .await;

        match envelope.data().and_then(login_payload) {
            Some(login) => {
                let store = self.store();
                store.set(CredentialKey::AccessToken, &login.tokens.access_token);
                store.set(CredentialKey::RefreshToken, &login.tokens.refresh_token);
                store.set(CredentialKey::UserId, &login.user.id);
                tracing::info!(user_id = %login.user.id, "logged in");
            }
            None if envelope.is_success() => {
                tracing::warn!("login succeeded without returning tokens");
            }
            None => {}
        }

        envelope
    }

    /// Sign out on the backend, then forget the session whatever the outcome.
    pub async fn logout(&self) -> Envelope {
        let refresh_token = self.store().get(CredentialKey::RefreshToken);
        let envelope = self
            .client
            .call(&Request::auth().logout(refresh_token), None)
            .await;

        self.store().clear_all();
        tracing::info!(success = envelope.is_success(), "logged out");

        envelope
    }

    pub async fn refresh(&self) -> Envelope {
        let request = Request::auth().refresh(
            self.store().get(CredentialKey::UserId),
            self.store().get(CredentialKey::RefreshToken),
        );
        let envelope = self.client.call(&request, None).await;

        if let Some(tokens) = envelope.data().and_then(TokenPair::from_body) {
            self.store()
                .set(CredentialKey::AccessToken, &tokens.access_token);
            self.store()
                .set(CredentialKey::RefreshToken, &tokens.refresh_token);
            tracing::info!("access token refreshed");
        }

        envelope
    }

    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Envelope {
        self.client
            .call(&Request::auth().verify_otp(phone, otp), None)
            .await
    }
}

/// Login bodies carry `{user, tokens}`, possibly wrapped in `data`.
fn login_payload(body: &Value) -> Option<LoginResponse> {
    [Some(body), body.get("data")]
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_value(candidate.clone()).ok())
}
