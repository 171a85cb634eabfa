use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    UserId,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 3] = [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::UserId,
    ];

    /// Name the key is persisted under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "accessToken",
            Self::RefreshToken => "refreshToken",
            Self::UserId => "userId",
        }
    }
}

impl Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of everything a session knows about the signed-in user.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Credentials {
    pub fn get(&self, key: CredentialKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn set(&mut self, key: CredentialKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    pub fn clear(&mut self, key: CredentialKey) {
        *self.slot_mut(key) = None;
    }

    pub fn is_empty(&self) -> bool {
        CredentialKey::ALL.iter().all(|key| self.slot(*key).is_none())
    }

    fn slot(&self, key: CredentialKey) -> &Option<String> {
        match key {
            CredentialKey::AccessToken => &self.access_token,
            CredentialKey::RefreshToken => &self.refresh_token,
            CredentialKey::UserId => &self.user_id,
        }
    }

    fn slot_mut(&mut self, key: CredentialKey) -> &mut Option<String> {
        match key {
            CredentialKey::AccessToken => &mut self.access_token,
            CredentialKey::RefreshToken => &mut self.refresh_token,
            CredentialKey::UserId => &mut self.user_id,
        }
    }
}

/// Process-wide storage for the session's tokens and user id.
///
/// Writes are last-write-wins; implementations only need to stay memory safe
/// under concurrent use.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Option<String>;

    fn set(&self, key: CredentialKey, value: &str);

    fn clear(&self, key: CredentialKey);

    fn clear_all(&self) {
        for key in CredentialKey::ALL {
            self.clear(key);
        }
    }

    fn snapshot(&self) -> Credentials {
        Credentials {
            access_token: self.get(CredentialKey::AccessToken),
            refresh_token: self.get(CredentialKey::RefreshToken),
            user_id: self.get(CredentialKey::UserId),
        }
    }
}

/// Credential store that lives only as long as the process.
#[derive(Default, Debug)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: CredentialKey) -> Option<String> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(str::to_string)
    }

    fn set(&self, key: CredentialKey, value: &str) {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value);
    }

    fn clear(&self, key: CredentialKey) {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear(key);
    }
}
