// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token issuance, health, and CORS tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chatkit_bridge::services::AuthenticateOptions;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::StubChatService;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_authenticate_returns_exact_body() {
    let chat = Arc::new(StubChatService::new());
    let app = common::create_test_app(chat.clone());

    let response = app.oneshot(get("/authenticate?user_id=alice")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = common::body_bytes(response).await;
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        r#"{"access_token":"tok123","expires_in":3600,"bearer":"bearer"}"#
    );

    assert_eq!(
        *chat.token_requests.lock().unwrap(),
        vec![AuthenticateOptions::for_user("alice")]
    );
}

#[tokio::test]
async fn test_missing_user_id_is_empty_string() {
    let chat = Arc::new(StubChatService::new());
    let app = common::create_test_app(chat.clone());

    let response = app.oneshot(get("/authenticate")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *chat.token_requests.lock().unwrap(),
        vec![AuthenticateOptions::for_user("")]
    );
}

#[tokio::test]
async fn test_repeated_user_id_uses_first_value() {
    let chat = Arc::new(StubChatService::new());
    let app = common::create_test_app(chat.clone());

    let response = app
        .oneshot(get("/authenticate?other=x&user_id=a&user_id=b"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *chat.token_requests.lock().unwrap(),
        vec![AuthenticateOptions::for_user("a")]
    );
}

#[tokio::test]
async fn test_token_provider_post_is_accepted() {
    let chat = Arc::new(StubChatService::new());
    let app = common::create_test_app(chat.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/authenticate?user_id=bob")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("grant_type=client_credentials"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *chat.token_requests.lock().unwrap(),
        vec![AuthenticateOptions::for_user("bob")]
    );
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let chat = Arc::new(StubChatService::new());
    chat.fail_with("services/chatkit/unavailable");
    let app = common::create_test_app(chat.clone());

    let response = app
        .clone()
        .oneshot(get("/authenticate?user_id=alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // Later requests are still served
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_check() {
    let app = common::create_test_app(Arc::new(StubChatService::new()));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&common::body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = common::create_test_app(Arc::new(StubChatService::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/users")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let app = common::create_test_app(Arc::new(StubChatService::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/authenticate?user_id=alice")
                .header(header::ORIGIN, "https://chat.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
