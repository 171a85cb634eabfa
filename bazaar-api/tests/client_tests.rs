use bazaar_api::{
    COMPLETED_SENTINEL, Client, CredentialKey, CredentialStore, Credentials, Envelope,
    MemoryCredentialStore, Method, RawRequest, Request,
};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNAUTHORIZED: &str = "Unauthorized. Please authenticate or sign up.";

fn client_for(server: &MockServer, store: Arc<MemoryCredentialStore>) -> Client {
    Client::new(server.uri(), store).unwrap()
}

fn signed_in_store() -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_credentials(Credentials {
        access_token: Some("expiredtoken".into()),
        refresh_token: Some("r1".into()),
        user_id: Some("u1".into()),
    }))
}

fn sentinel() -> Value {
    Value::String(COMPLETED_SENTINEL.to_string())
}

#[tokio::test]
async fn passes_parsed_body_through_unchanged() {
    let server = MockServer::start().await;
    let body = json!({"success": true, "data": [{"id": "cat1", "name": "Shoes"}]});
    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    let result = client.send("/categories", Method::Get, None, None).await;

    assert_eq!(result, Envelope::Success(body.clone()));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": true, "data": body})
    );

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn attaches_bearer_token_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"name": "Shoes", "description": "Footwear"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "cat9"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    let request = Request::categories().create("Shoes", "Footwear");
    let result = client.call(&request, Some("tok")).await;

    assert_eq!(result.data(), Some(&json!({"id": "cat9"})));
}

#[tokio::test]
async fn null_body_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    let request = RawRequest::new(Method::Post, "/auth/logout").body(Value::Null);
    let result = client.send_raw(&request).await;

    assert_eq!(result, Envelope::Success(sentinel()));
    let received = server.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn no_content_yields_sentinel_for_any_method() {
    let server = MockServer::start().await;
    Mock::given(path("/cart/clear/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    for verb in [Method::Put, Method::Delete, Method::Get] {
        let result = client.send("/cart/clear/c1", verb, None, Some("tok")).await;
        assert_eq!(result, Envelope::Success(sentinel()), "method {}", verb);
    }
}

#[tokio::test]
async fn empty_or_malformed_body_maps_to_sentinel() {
    let server = MockServer::start().await;
    Mock::given(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(path("/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops"))
        .mount(&server)
        .await;
    Mock::given(path("/null"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    for endpoint in ["/empty", "/garbled", "/null"] {
        let result = client.send(endpoint, Method::Get, None, None).await;
        assert_eq!(result, Envelope::Success(sentinel()), "endpoint {}", endpoint);
    }
}

#[tokio::test]
async fn bad_request_hides_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "phone already taken"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    let result = client
        .send(
            "/users/register",
            Method::Post,
            Some(&json!({"phone": "0700"})),
            None,
        )
        .await;

    assert_eq!(
        result,
        Envelope::failure("Bad request. Please check your request parameters.")
    );
}

#[tokio::test]
async fn other_statuses_report_code() {
    let server = MockServer::start().await;
    Mock::given(path("/shops"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(path("/users/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));

    let result = client.send("/shops", Method::Get, None, Some("tok")).await;
    assert_eq!(result.error(), Some("HTTP error! status: 500"));

    let result = client.send("/users/missing", Method::Get, None, Some("tok")).await;
    assert_eq!(result.error(), Some("HTTP error! status: 404"));
}

#[tokio::test]
async fn refreshes_and_retries_once_after_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .and(header("authorization", "Bearer expiredtoken"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .and(body_json(json!({"userId": "u1", "refreshToken": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"accessToken": "new", "refreshToken": "new2"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .and(header("authorization", "Bearer new"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "abc", "username": "amy"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, store.clone());
    let result = client
        .send("/users/abc", Method::Get, None, Some("expiredtoken"))
        .await;

    assert_eq!(
        result,
        Envelope::Success(json!({"id": "abc", "username": "amy"}))
    );
    assert_eq!(store.get(CredentialKey::AccessToken).as_deref(), Some("new"));
    assert_eq!(
        store.get(CredentialKey::RefreshToken).as_deref(),
        Some("new2")
    );
    assert_eq!(store.get(CredentialKey::UserId).as_deref(), Some("u1"));

    let refresh = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|request| request.url.path() == "/auth/refresh-token")
        .unwrap();
    assert!(refresh.headers.get("authorization").is_none());
}

#[tokio::test]
async fn rejected_refresh_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, store.clone());
    let result = client
        .send("/users/abc", Method::Get, None, Some("expiredtoken"))
        .await;

    assert_eq!(result, Envelope::failure(UNAUTHORIZED));
    assert_eq!(
        store.get(CredentialKey::AccessToken).as_deref(),
        Some("expiredtoken")
    );
}

#[tokio::test]
async fn retry_that_is_still_unauthorized_does_not_refresh_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shops"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "new",
            "refreshToken": "new2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, signed_in_store());
    let result = client
        .send("/shops", Method::Get, None, Some("expiredtoken"))
        .await;

    assert_eq!(result, Envelope::failure(UNAUTHORIZED));
}

#[tokio::test]
async fn anonymous_unauthorized_still_attempts_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .and(body_json(json!({"userId": null, "refreshToken": null})))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = client_for(&server, store.clone());
    let result = client
        .send("/products", Method::Post, Some(&json!({"name": "x"})), None)
        .await;

    assert_eq!(result, Envelope::failure(UNAUTHORIZED));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn refresh_without_tokens_counts_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart/c1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": "expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, store.clone());
    let result = client.send("/cart/c1", Method::Get, None, Some("expiredtoken")).await;

    assert_eq!(result, Envelope::failure(UNAUTHORIZED));
    assert_eq!(store.get(CredentialKey::RefreshToken).as_deref(), Some("r1"));
}

#[tokio::test]
async fn transport_failure_becomes_failure_envelope() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let store = signed_in_store();
    let client = Client::new(format!("http://127.0.0.1:{}", port), store.clone()).unwrap();
    let result = client
        .send("/categories", Method::Get, None, Some("expiredtoken"))
        .await;

    assert!(!result.is_success());
    assert!(!result.error().unwrap().is_empty());
    assert_ne!(result.error(), Some(UNAUTHORIZED));
    assert_eq!(
        store.get(CredentialKey::AccessToken).as_deref(),
        Some("expiredtoken")
    );
}

#[tokio::test]
async fn repeated_sends_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(2)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let before = store.snapshot();
    let client = client_for(&server, store.clone());
    let request = RawRequest::new(Method::Get, "/products");

    let first = client.send_raw(&request).await;
    let second = client.send_raw(&request).await;

    assert_eq!(first, second);
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn typed_cart_update_hits_item_route() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/cart/items/i1"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"cartItemId": "i1", "quantity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "i1", "quantity": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryCredentialStore::new()));
    let request = Request::cart("c1").items().update("i1", 2);
    let result = client.call(&request, Some("tok")).await;

    assert!(result.is_success());
}
