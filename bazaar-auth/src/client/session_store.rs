use crate::error::AuthError;
use bazaar_api::{CredentialKey, CredentialStore, Credentials};
use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// On-disk layout of the session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(flatten)]
    credentials: Credentials,
    #[serde(with = "ts_seconds")]
    updated_at: DateTime<Utc>,
}

/// Credential store persisted to a JSON file so a session survives restarts.
///
/// Reads are served from memory. Every write goes through to disk; a failed
/// write is logged and the in-memory value still wins.
pub struct SessionStore {
    session_path: PathBuf,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    credentials: Credentials,
    updated_at: Option<DateTime<Utc>>,
}

impl SessionStore {
    pub fn new() -> Result<Self, AuthError> {
        Self::at(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("bazaar");
        Ok(cache_dir.join("session.json"))
    }

    /// Open the session stored at `path`, creating its directory if needed.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let session_path = path.into();

        if let Some(dir) = session_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    AuthError::SessionStorage(format!("Failed to create session directory: {}", e))
                })?;
            }
        }

        let state = match Self::load(&session_path)? {
            Some(file) => SessionState {
                credentials: file.credentials,
                updated_at: Some(file.updated_at),
            },
            None => SessionState::default(),
        };

        Ok(Self {
            session_path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.session_path
    }

    /// When the stored credentials last changed, if there are any.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .updated_at
    }

    fn load(path: &Path) -> Result<Option<SessionFile>, AuthError> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to read session: {}", e)))?;

        let file: SessionFile = serde_json::from_str(&json)?;
        Ok(Some(file))
    }

    fn update(&self, change: impl FnOnce(&mut Credentials)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut state.credentials);

        if state.credentials.is_empty() {
            state.updated_at = None;
            if let Err(e) = self.delete() {
                tracing::warn!(path = %self.session_path.display(), error = %e, "failed to remove session file");
            }
            return;
        }

        let now = Utc::now();
        state.updated_at = Some(now);
        let file = SessionFile {
            credentials: state.credentials.clone(),
            updated_at: now,
        };
        if let Err(e) = self.save(&file) {
            tracing::warn!(path = %self.session_path.display(), error = %e, "failed to persist session");
        }
    }

    fn save(&self, file: &SessionFile) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(file)?;

        fs::write(&self.session_path, json)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to save session: {}", e)))?;

        // Tokens are readable by the owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.session_path)
                .map_err(|e| {
                    AuthError::SessionStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_path, perms).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    fn delete(&self) -> Result<(), AuthError> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path)
                .map_err(|e| AuthError::SessionStorage(format!("Failed to delete session: {}", e)))?;
        }
        Ok(())
    }
}

impl CredentialStore for SessionStore {
    fn get(&self, key: CredentialKey) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .credentials
            .get(key)
            .map(str::to_string)
    }

    fn set(&self, key: CredentialKey, value: &str) {
        self.update(|credentials| credentials.set(key, value));
    }

    fn clear(&self, key: CredentialKey) {
        self.update(|credentials| credentials.clear(key));
    }

    fn clear_all(&self) {
        self.update(|credentials| *credentials = Credentials::default());
    }

    fn snapshot(&self) -> Credentials {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .credentials
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("bazaar-test-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn starts_empty_without_file() {
        let store = SessionStore::at(temp_session_path()).unwrap();
        assert!(store.snapshot().is_empty());
        assert!(store.updated_at().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn writes_survive_reopen() {
        let path = temp_session_path();
        {
            let store = SessionStore::at(&path).unwrap();
            store.set(CredentialKey::AccessToken, "a1");
            store.set(CredentialKey::RefreshToken, "r1");
            store.set(CredentialKey::UserId, "u1");
            assert!(store.updated_at().is_some());
        }

        let reopened = SessionStore::at(&path).unwrap();
        assert_eq!(reopened.get(CredentialKey::AccessToken).as_deref(), Some("a1"));
        assert_eq!(reopened.get(CredentialKey::RefreshToken).as_deref(), Some("r1"));
        assert_eq!(reopened.get(CredentialKey::UserId).as_deref(), Some("u1"));
    }

    #[test]
    fn file_uses_storage_key_names() {
        let path = temp_session_path();
        let store = SessionStore::at(&path).unwrap();
        store.set(CredentialKey::AccessToken, "a1");

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["accessToken"], "a1");
        assert!(json.get("refreshToken").is_none());
        assert!(json["updated_at"].is_i64());
    }

    #[test]
    fn clearing_everything_removes_file() {
        let path = temp_session_path();
        let store = SessionStore::at(&path).unwrap();
        store.set(CredentialKey::AccessToken, "a1");
        store.set(CredentialKey::UserId, "u1");
        assert!(path.exists());

        store.clear(CredentialKey::AccessToken);
        assert!(path.exists());

        store.clear_all();
        assert!(!path.exists());
        assert!(store.snapshot().is_empty());
        assert!(store.updated_at().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_session_path();
        let store = SessionStore::at(&path).unwrap();
        store.set(CredentialKey::RefreshToken, "r1");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_session_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(matches!(SessionStore::at(&path), Err(AuthError::Json(_))));
    }
}
