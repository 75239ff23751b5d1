use crate::common::{self, bearer, profile_body, refresh_body};
use auth_session_client::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn expired_body() -> String {
    json!({"statusCode": 401, "message": "Token expired"}).to_string()
}

#[tokio::test]
async fn test_401_refreshes_once_and_retries() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("old.access.token", "r1").await;

    let rejected = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", bearer("old.access.token").as_str())
        .with_status(401)
        .with_body(expired_body())
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"refreshToken": "r1"})))
        .with_status(200)
        .with_body(refresh_body("new.access.token", "r2").to_string())
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", bearer("new.access.token").as_str())
        .with_status(200)
        .with_body(profile_body().to_string())
        .expect(1)
        .create_async()
        .await;

    let user = client.get_profile().await.expect("profile after refresh");
    assert_eq!(user.id, "user-1");
    assert_eq!(
        client.tokens().await,
        Some(TokenPair::new("new.access.token", "r2"))
    );

    rejected.assert_async().await;
    refresh.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("old.access.token", "r1").await;

    let rejected = server
        .mock("GET", "/auth/profile")
        .with_status(401)
        .with_body(expired_body())
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .with_body(json!({"message": "Invalid refresh token"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let err = client.get_profile().await.expect_err("refresh rejected");
    match err {
        AppError::Authentication(msg) => {
            assert_eq!(msg, "authentication failed and token refresh failed")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated().await);
    assert!(client.tokens().await.is_none());

    rejected.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_retry_still_unauthorized_does_not_loop() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("old.access.token", "r1").await;

    let profile = server
        .mock("GET", "/auth/profile")
        .with_status(401)
        .with_body(json!({"message": "Account disabled"}).to_string())
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(refresh_body("new.access.token", "r2").to_string())
        .expect(1)
        .create_async()
        .await;

    let err = client.get_profile().await.expect_err("still unauthorized");
    match err {
        AppError::Authentication(msg) => assert_eq!(msg, "Account disabled"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated().await);

    profile.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_401_without_session_skips_refresh() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());

    let profile = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(json!({"message": "Unauthorized"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .expect(0)
        .create_async()
        .await;

    let err = client.get_profile().await.expect_err("unauthenticated");
    match err {
        AppError::Authentication(msg) => assert_eq!(msg, "Unauthorized"),
        other => panic!("unexpected error: {other:?}"),
    }

    profile.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_non_401_errors_skip_refresh() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("a.b.c", "r1").await;

    server
        .mock("PATCH", "/auth/change-password")
        .with_status(403)
        .with_body(json!({"message": "Forbidden"}).to_string())
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .expect(0)
        .create_async()
        .await;

    let err = client
        .change_password("old", "new")
        .await
        .expect_err("forbidden");
    assert!(matches!(err, AppError::Service { .. }));
    assert!(client.is_authenticated().await);
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let mut server = Server::new_async().await;
    let client = Arc::new(common::create_test_client(&server.url()));
    client.set_tokens("old.access.token", "r1").await;

    server
        .mock("GET", "/auth/profile")
        .match_header("authorization", bearer("old.access.token").as_str())
        .with_status(401)
        .with_body(expired_body())
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(refresh_body("new.access.token", "r2").to_string())
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", bearer("new.access.token").as_str())
        .with_status(200)
        .with_body(profile_body().to_string())
        .expect(4)
        .create_async()
        .await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_profile().await })
        })
        .collect();

    for handle in handles {
        let user = handle.await.expect("join").expect("profile");
        assert_eq!(user.id, "user-1");
    }

    assert_eq!(
        client.tokens().await,
        Some(TokenPair::new("new.access.token", "r2"))
    );
    refresh.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn test_manual_refresh_replaces_pair() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("a1.b.c", "r1").await;

    let refresh = server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(json!({"refreshToken": "r1"})))
        .with_status(200)
        .with_body(refresh_body("a2.b.c", "r2").to_string())
        .expect(1)
        .create_async()
        .await;

    let tokens = client.refresh_tokens().await.expect("refreshed");
    assert_eq!(tokens, TokenPair::new("a2.b.c", "r2"));
    assert_eq!(client.tokens().await, Some(tokens));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_manual_refresh_failure_keeps_session() {
    let mut server = Server::new_async().await;
    let client = common::create_test_client(&server.url());
    client.set_tokens("a1.b.c", "r1").await;

    server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .with_body(json!({"message": "Invalid refresh token"}).to_string())
        .create_async()
        .await;

    let err = client.refresh_tokens().await.expect_err("rejected");
    match err {
        AppError::Authentication(msg) => assert_eq!(msg, "Invalid refresh token"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.tokens().await, Some(TokenPair::new("a1.b.c", "r1")));
}
