use crate::common::{self, bearer};
use auth_session_client::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn test_logout_notifies_service_and_clears() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("a.b.c", "r1").await;

    let logout = server
        .mock("POST", "/auth/logout")
        .match_header("authorization", bearer("a.b.c").as_str())
        .match_body(Matcher::Json(json!({"refreshToken": "r1"})))
        .with_status(200)
        .with_body(json!({"message": "Logged out successfully"}).to_string())
        .expect(1)
        .create_async()
        .await;

    client.logout().await;

    assert!(!client.is_authenticated().await);
    logout.assert_async().await;
}

#[tokio::test]
async fn test_logout_clears_on_server_error() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("a.b.c", "r1").await;

    let logout = server
        .mock("POST", "/auth/logout")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    client.logout().await;

    assert!(!client.is_authenticated().await);
    assert!(client.tokens().await.is_none());
    logout.assert_async().await;
}

#[tokio::test]
async fn test_logout_without_session_makes_no_call() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());

    let logout = server
        .mock("POST", "/auth/logout")
        .expect(0)
        .create_async()
        .await;

    client.logout().await;

    assert!(!client.is_authenticated().await);
    logout.assert_async().await;
}

#[tokio::test]
async fn test_calls_after_logout_are_anonymous() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("a.b.c", "r1").await;

    server
        .mock("POST", "/auth/logout")
        .with_status(200)
        .create_async()
        .await;
    let profile = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(json!({"message": "Unauthorized"}).to_string())
        .expect(1)
        .create_async()
        .await;

    client.logout().await;
    let err = client.get_profile().await.expect_err("logged out");
    assert!(err.is_authentication());
    profile.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_logout_does_not_refresh() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("old.access.token", "r1").await;

    let logout = server
        .mock("POST", "/auth/logout")
        .match_body(Matcher::Json(json!({"refreshToken": "r1"})))
        .with_status(401)
        .with_body(json!({"message": "Token expired"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .expect(0)
        .create_async()
        .await;

    client.logout().await;

    assert!(!client.is_authenticated().await);
    logout.assert_async().await;
    refresh.assert_async().await;
}
