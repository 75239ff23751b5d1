use auth_session_client::application::auth::{SessionPhase, TokenPair};
use auth_session_client::application::client::Client;
use auth_session_client::application::config::Config;
use auth_session_client::application::interfaces::account::AccountService;
use auth_session_client::error::AppError;
use auth_session_client::model::auth::encode_claims;
use chrono::Utc;
use serde_json::json;

// Nothing listens here; calls that reach the network fail with a transport error
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn offline_client() -> Client {
    Client::new(Config::builder().base_url(UNREACHABLE).build()).expect("client")
}

fn jwt(payload: serde_json::Value) -> String {
    let claims = payload.as_object().cloned().expect("object");
    format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", encode_claims(&claims))
}

#[tokio::test]
async fn new_client_is_unauthenticated() {
    let client = offline_client();
    assert!(!client.is_authenticated().await);
    assert!(client.tokens().await.is_none());
    assert!(client.token_info().await.is_none());
    assert!(client.is_token_expired().await);
    assert_eq!(client.session_phase().await, SessionPhase::Unauthenticated);
}

#[tokio::test]
async fn login_without_tenant_fails_before_network() {
    let client = offline_client();
    let err = client
        .login("user@example.com", "secret", None)
        .await
        .expect_err("tenant required");
    match err {
        AppError::Configuration(msg) => assert!(msg.contains("tenantId is required")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn register_without_tenant_fails_before_network() {
    let client = offline_client();
    let err = client
        .register("user@example.com", "secret", "User", None)
        .await
        .expect_err("tenant required");
    assert!(matches!(err, AppError::Configuration(_)));
}

#[tokio::test]
async fn set_tokens_authenticates_and_clear_tokens_resets() {
    let client = offline_client();
    client.set_tokens("a.b.c", "r1").await;

    assert!(client.is_authenticated().await);
    assert_eq!(client.tokens().await, Some(TokenPair::new("a.b.c", "r1")));
    assert_eq!(client.session_phase().await, SessionPhase::Authenticated);

    client.clear_tokens().await;
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn token_info_and_expiry_follow_held_token() {
    let client = offline_client();
    let exp = Utc::now().timestamp() + 3600;
    client
        .set_tokens(jwt(json!({"sub": "user-1", "tenantId": "tenant-1", "exp": exp})), "r1")
        .await;

    let info = client.token_info().await.expect("claims");
    assert_eq!(info.get("sub"), Some(&json!("user-1")));
    assert_eq!(info.get("exp"), Some(&json!(exp)));
    assert!(!client.is_token_expired().await);

    client
        .set_tokens(jwt(json!({"sub": "user-1", "exp": exp - 7200})), "r1")
        .await;
    assert!(client.is_token_expired().await);

    client.set_tokens("opaque", "r1").await;
    assert!(client.token_info().await.is_none());
    assert!(client.is_token_expired().await);
    // Opaque tokens still count as authenticated
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn refresh_without_refresh_token_is_authentication_error() {
    let client = offline_client();
    let err = client.refresh_tokens().await.expect_err("no refresh token");
    match err {
        AppError::Authentication(msg) => assert!(msg.contains("no refresh token available")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn logout_clears_tokens_when_service_unreachable() {
    let client = offline_client();
    client.set_tokens("a.b.c", "r1").await;

    client.logout().await;

    assert!(!client.is_authenticated().await);
    assert!(client.tokens().await.is_none());
}

#[tokio::test]
async fn transport_failure_surfaces_as_transport_error() {
    let client = offline_client();
    client.set_tokens("a.b.c", "r1").await;

    let err = client.get_profile().await.expect_err("unreachable");
    assert!(matches!(err, AppError::Transport(_)));
    // Only a 401 touches the session
    assert!(client.is_authenticated().await);
}
