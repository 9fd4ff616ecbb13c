//! Integration tests for the reqwest adapter against a local mock server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use studex_application::ports::{HttpClient, HttpClientError};
use studex_domain::{AccessToken, RequestSpec, StatusCode};
use studex_infrastructure::ReqwestHttpClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ReqwestHttpClient {
    ReqwestHttpClient::new(Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn test_get_sends_bearer_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/2026/"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "A"}])))
        .expect(1)
        .mount(&server)
        .await;

    let token = AccessToken::new("secret-token").unwrap();
    let request = RequestSpec::get(format!("{}/api/2026/", server.uri())).with_bearer(&token);
    let response = client().execute(request).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let body: serde_json::Value = response.json_body().unwrap();
    assert_eq!(body, json!([{"id": 1, "name": "A"}]));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"username": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "a", "refresh": "r"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = RequestSpec::post_json(
        format!("{}/api/token/", server.uri()),
        &json!({"username": "u", "password": "p"}),
    )
    .unwrap();
    let response = client().execute(request).await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_error_statuses_are_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let response = client()
        .execute(RequestSpec::get(format!("{}/api/2026/99", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = ReqwestHttpClient::new(Duration::from_millis(100)).unwrap();
    let err = client
        .execute(RequestSpec::get(server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err, HttpClientError::Timeout { timeout_ms: 100 });
}

#[tokio::test]
async fn test_unreachable_host_is_connection_failure() {
    // Bind then release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = client()
        .execute(RequestSpec::get(format!("http://127.0.0.1:{port}/")))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpClientError::ConnectionFailed(_)));
}
