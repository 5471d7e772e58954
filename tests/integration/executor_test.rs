//! Executor behavior against a live mock HTTP server.

use super::test_executor;
use serde_json::json;
use webpost::executor::ExecutorError;
use webpost::models::{HttpMethod, RequestSpec, ResponseData};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_json_sends_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Alice"})))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::GET, format!("{}/users/1", server.uri()));
    let result = test_executor().execute(&spec).await.unwrap();

    assert_eq!(result.status, 200);
    assert_eq!(result.status_text, "OK");
    assert_eq!(result.data, ResponseData::Json(json!({"id": 1, "name": "Alice"})));
    assert_eq!(result.content_type(), Some("application/json"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "Bob"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::POST, format!("{}/users", server.uri()))
        .with_body(r#"{"name": "Bob"}"#);
    let result = test_executor().execute(&spec).await.unwrap();

    assert_eq!(result.status, 201);
    assert_eq!(result.data.as_json(), Some(&json!({"id": 2})));
}

#[tokio::test]
async fn test_caller_header_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::GET, server.uri()).with_header("Accept", "text/plain");
    let result = test_executor().execute(&spec).await.unwrap();

    assert_eq!(result.data, ResponseData::Text("plain".to_string()));
}

#[tokio::test]
async fn test_html_body_is_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<h1>Hi</h1>", "text/html"))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::GET, server.uri());
    let result = test_executor().execute(&spec).await.unwrap();

    assert_eq!(result.data.as_text(), Some("<h1>Hi</h1>"));
    assert_eq!(result.content_type(), Some("text/html"));
}

#[tokio::test]
async fn test_error_status_uses_body_message() {
    let server = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not here"})))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let executor = test_executor();
    let missing = RequestSpec::new(HttpMethod::GET, format!("{}/missing", server.uri()));
    let broken = RequestSpec::new(HttpMethod::DELETE, format!("{}/broken", server.uri()));

    assert_eq!(
        executor.execute(&missing).await.unwrap_err(),
        ExecutorError::Http {
            status: 404,
            message: "Not here".to_string()
        }
    );
    let err = executor.execute(&broken).await.unwrap_err();
    assert_eq!(err.user_message(), "Request failed with status 500: boom");
}

#[tokio::test]
async fn test_declared_json_that_does_not_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{broken", "application/json"))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::GET, server.uri());
    let err = test_executor().execute(&spec).await.unwrap_err();

    assert!(matches!(err, ExecutorError::Parse(_)));
    assert!(err.to_string().starts_with("Failed to parse response: "));
}

#[tokio::test]
async fn test_invalid_body_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::PUT, server.uri()).with_body("{not json");
    let err = test_executor().execute(&spec).await.unwrap_err();

    assert_eq!(
        err,
        ExecutorError::InvalidInput("Invalid JSON in request body".to_string())
    );
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let spec = RequestSpec::new(HttpMethod::GET, format!("http://127.0.0.1:{}/", port));
    let err = test_executor().execute(&spec).await.unwrap_err();

    assert!(matches!(err, ExecutorError::Network(_)));
    assert!(err.user_message().starts_with("Server is unreachable"));
}

#[tokio::test]
async fn test_repeated_response_headers_are_joined() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("x-multi", "a")
                .append_header("x-multi", "b")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::GET, server.uri());
    let result = test_executor().execute(&spec).await.unwrap();

    assert_eq!(result.headers.get("x-multi").map(String::as_str), Some("a, b"));
}

#[tokio::test]
async fn test_unregistered_status_has_empty_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(299).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(HttpMethod::GET, server.uri());
    let result = test_executor().execute(&spec).await.unwrap();

    assert_eq!(result.status, 299);
    assert_eq!(result.status_text, "");
}
