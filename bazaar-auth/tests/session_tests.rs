use bazaar_api::{CredentialKey, CredentialStore};
use bazaar_auth::{connect, AuthSession, SessionStore, Settings};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_session_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("bazaar-session-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}

fn session_for(server: &MockServer) -> (AuthSession, Arc<SessionStore>) {
    let settings = Settings {
        base_url: server.uri(),
        session_file: Some(temp_session_path()),
        ..Settings::default()
    };
    let (client, store) = connect(&settings).unwrap();
    (AuthSession::new(client), store)
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"phone": "0700000000", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u1", "username": "amy"},
            "tokens": {"accessToken": "a1", "refreshToken": "r1"}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_persists_tokens_and_user() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let (session, store) = session_for(&server);
    let result = session.login("0700000000", "secret").await;

    assert!(result.is_success());
    assert!(session.is_authenticated());
    assert_eq!(session.user_id().as_deref(), Some("u1"));
    assert_eq!(store.get(CredentialKey::RefreshToken).as_deref(), Some("r1"));
    assert!(store.path().exists());
}

#[tokio::test]
async fn failed_login_leaves_store_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let (session, store) = session_for(&server);
    let result = session.login("0700000000", "wrong").await;

    assert_eq!(
        result.error(),
        Some("Bad request. Please check your request parameters.")
    );
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({"refreshToken": "r1"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (session, store) = session_for(&server);
    session.login("0700000000", "secret").await;
    let result = session.logout().await;

    assert_eq!(result.error(), Some("HTTP error! status: 500"));
    assert!(store.snapshot().is_empty());
    assert!(!store.path().exists());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn manual_refresh_rotates_tokens() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .and(body_json(json!({"userId": "u1", "refreshToken": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "a2",
            "refreshToken": "r2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (session, store) = session_for(&server);
    session.login("0700000000", "secret").await;
    let result = session.refresh().await;

    assert!(result.is_success());
    assert_eq!(session.access_token().as_deref(), Some("a2"));
    assert_eq!(store.get(CredentialKey::RefreshToken).as_deref(), Some("r2"));
}

#[tokio::test]
async fn refreshed_tokens_reach_disk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(wiremock::matchers::header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "fresh", "refreshToken": "r2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(wiremock::matchers::header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .mount(&server)
        .await;

    let (session, store) = session_for(&server);
    store.set(CredentialKey::UserId, "u1");
    store.set(CredentialKey::RefreshToken, "r1");

    let result = session
        .client()
        .send("/users/u1", bazaar_api::Method::Get, None, Some("stale"))
        .await;
    assert!(result.is_success());

    let reopened = SessionStore::at(store.path()).unwrap();
    assert_eq!(reopened.get(CredentialKey::AccessToken).as_deref(), Some("fresh"));
    assert_eq!(reopened.get(CredentialKey::RefreshToken).as_deref(), Some("r2"));
}

#[test]
fn connect_rejects_invalid_settings() {
    let settings = Settings {
        base_url: "ftp://example.com".to_string(),
        session_file: Some(temp_session_path()),
        ..Settings::default()
    };
    assert!(connect(&settings).is_err());
}
