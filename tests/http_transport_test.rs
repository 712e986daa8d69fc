// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use vultr_cli::infrastructure::api::ApiRequest;
use vultr_cli::{CancelToken, CliError, HttpTransport, Transport};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer, key: &str) -> HttpTransport {
    HttpTransport::with_base_url(format!("{}/v2", server.uri()), key, CancelToken::new())
        .unwrap()
        .with_retry(3, Duration::from_millis(1))
}

#[tokio::test]
async fn test_bearer_key_and_query_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/blocks"))
        .and(header("authorization", "Bearer secret"))
        .and(query_param("per_page", "250"))
        .and(query_param("cursor", "abc=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"blocks": []})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::GET, "blocks").with_query(vec![
        ("per_page".to_string(), "250".to_string()),
        ("cursor".to_string(), "abc==".to_string()),
    ]);
    let body = transport(&server, "secret").send(request).await.unwrap();
    assert_eq!(body, br#"{"blocks":[]}"#.to_vec());
}

#[tokio::test]
async fn test_no_authorization_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plans": []})))
        .mount(&server)
        .await;

    transport(&server, "")
        .send(ApiRequest::new(Method::GET, "plans"))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_json_body_is_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/blocks"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"region": "lax", "size_gb": 10})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"block": {"id": "b1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::POST, "blocks")
        .with_body(json!({"region": "lax", "size_gb": 10}));
    transport(&server, "k").send(request).await.unwrap();
}

#[tokio::test]
async fn test_error_message_taken_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/blocks/x"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "block not found", "status": 404})),
        )
        .mount(&server)
        .await;

    let err = transport(&server, "k")
        .send(ApiRequest::new(Method::DELETE, "blocks/x"))
        .await
        .unwrap_err();
    match err {
        CliError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "block not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_json_uses_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API token."))
        .mount(&server)
        .await;

    let err = transport(&server, "bad")
        .send(ApiRequest::new(Method::GET, "account"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid API token. (HTTP 401)");
}

#[tokio::test]
async fn test_get_is_retried_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"account": {}})))
        .mount(&server)
        .await;

    transport(&server, "k")
        .send(ApiRequest::new(Method::GET, "account"))
        .await
        .unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_post_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/instances"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = transport(&server, "k")
        .send(ApiRequest::new(Method::POST, "instances").with_body(json!({})))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/blocks/x"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad id"})))
        .mount(&server)
        .await;

    let err = transport(&server, "k")
        .send(ApiRequest::new(Method::GET, "blocks/x"))
        .await
        .unwrap_err();
    assert!(!err.is_retryable());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
