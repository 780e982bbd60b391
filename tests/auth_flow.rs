//! Integration tests for the identity flows using wiremock HTTP
//! mocks.

use gamedeals_rs::auth::{AuthRepository as _, IdentityClient, ProviderAuthRepository};
use gamedeals_rs::error::GameDealsError;
use secrecy::SecretString;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_repository(server: &MockServer) -> ProviderAuthRepository {
    let client = IdentityClient::builder()
        .api_key(SecretString::from("test-key".to_owned()))
        .base_url(server.uri())
        .build()
        .expect("client construction should not fail");
    ProviderAuthRepository::new(client)
}

fn unique_email() -> String {
    format!("player-{}@example.com", Uuid::new_v4())
}

fn password() -> SecretString {
    SecretString::from("hunter2".to_owned())
}

async fn mount_sign_in_success(server: &MockServer, email: &str) {
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({ "email": email })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "u-1",
            "idToken": "token-1",
            "email": email,
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts:lookup"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{
                "localId": "u-1",
                "email": email,
                "displayName": "Player One",
                "createdAt": "1700000000000"
            }]
        })))
        .mount(server)
        .await;
}

fn provider_error(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": { "message": code }
    }))
}

#[tokio::test]
async fn sign_in_resolves_the_full_account_record() {
    let server = MockServer::start().await;
    let email = unique_email();
    mount_sign_in_success(&server, &email).await;

    let repository = test_repository(&server);
    let user = repository
        .sign_in(&email, &password())
        .await
        .expect("sign-in should succeed");

    assert_eq!(user.uid.as_inner(), "u-1");
    assert_eq!(user.email.as_deref(), Some(email.as_str()));
    assert_eq!(user.display_name, "Player One");
}

#[tokio::test]
async fn sign_in_pushes_the_session_to_subscribers() {
    let server = MockServer::start().await;
    let email = unique_email();
    mount_sign_in_success(&server, &email).await;

    let repository = test_repository(&server);
    let mut stream = repository.subscribe();
    assert_eq!(stream.next().await, Some(None));

    let user = repository.sign_in(&email, &password()).await.unwrap();
    let pushed = stream.next().await.flatten().expect("session should be set");
    assert_eq!(pushed, user);
    assert_eq!(repository.current_user().await, Some(user));
}

#[tokio::test]
async fn wrong_password_maps_to_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .respond_with(provider_error("INVALID_PASSWORD"))
        .mount(&server)
        .await;

    let repository = test_repository(&server);
    let err = repository
        .sign_in(&unique_email(), &password())
        .await
        .unwrap_err();

    assert!(matches!(err, GameDealsError::InvalidCredentials { .. }));
    assert_eq!(err.provider_code(), Some("INVALID_PASSWORD"));
    assert!(repository.current_user().await.is_none());
}

#[tokio::test]
async fn unknown_email_maps_to_account_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .respond_with(provider_error("EMAIL_NOT_FOUND"))
        .mount(&server)
        .await;

    let repository = test_repository(&server);
    let err = repository
        .sign_in(&unique_email(), &password())
        .await
        .unwrap_err();
    assert!(matches!(err, GameDealsError::AccountNotFound { .. }));
}

#[tokio::test]
async fn taken_email_maps_to_email_already_in_use() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts:signUp"))
        .respond_with(provider_error("EMAIL_EXISTS"))
        .mount(&server)
        .await;

    let repository = test_repository(&server);
    let err = repository
        .register(&unique_email(), &password(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GameDealsError::EmailAlreadyInUse { .. }));
}

#[tokio::test]
async fn registration_sets_the_display_name() {
    let server = MockServer::start().await;
    let email = unique_email();

    Mock::given(method("POST"))
        .and(path("/accounts:signUp"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "u-2",
            "idToken": "token-2",
            "email": email,
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts:update"))
        .and(body_partial_json(serde_json::json!({
            "idToken": "token-2",
            "displayName": "New Player"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "u-2",
            "idToken": "token-2",
            "displayName": "New Player",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts:lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{
                "localId": "u-2",
                "email": email,
                "displayName": "New Player",
                "createdAt": "1700000000000"
            }]
        })))
        .mount(&server)
        .await;

    let repository = test_repository(&server);
    let user = repository
        .register(&email, &password(), Some("New Player"))
        .await
        .expect("registration should succeed");

    assert_eq!(user.uid.as_inner(), "u-2");
    assert_eq!(user.display_name, "New Player");
    assert_eq!(repository.current_user().await, Some(user));
}

#[tokio::test]
async fn empty_lookup_falls_back_to_the_token_response() {
    let server = MockServer::start().await;
    let email = unique_email();

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "u-3",
            "idToken": "token-3",
            "email": email,
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts:lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": []
        })))
        .mount(&server)
        .await;

    let repository = test_repository(&server);
    let user = repository.sign_in(&email, &password()).await.unwrap();
    assert_eq!(user.uid.as_inner(), "u-3");
    assert!(user.display_name.is_empty());
}

#[tokio::test]
async fn sign_out_clears_the_session_and_notifies() {
    let server = MockServer::start().await;
    let email = unique_email();
    mount_sign_in_success(&server, &email).await;

    let repository = test_repository(&server);
    let _user = repository.sign_in(&email, &password()).await.unwrap();

    let mut stream = repository.subscribe();
    assert!(stream.next().await.flatten().is_some());

    repository.sign_out().await.unwrap();
    assert_eq!(stream.next().await, Some(None));
    assert!(repository.current_user().await.is_none());

    // A second sign-out is a no-op.
    repository.sign_out().await.unwrap();
}
