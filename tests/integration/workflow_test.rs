//! Coordinator workflows with history persisted to disk.

use super::{app_in, init_test_env};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use webpost::history::{FileStore, HistoryStore, HISTORY_STORAGE_KEY};
use webpost::models::{HttpMethod, RequestForm, RequestSpec, ResponseData};
use webpost::ImportOutcome;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_users() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2})))
        .mount(&server)
        .await;
    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(410).set_body_json(json!({"error": "Gone for good"})))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let server = server_with_users().await;
    let url = format!("{}/users", server.uri());

    {
        let mut app = app_in(dir.path());
        app.submit(RequestSpec::new(HttpMethod::GET, url.clone()))
            .await
            .unwrap();
        app.submit(RequestSpec::new(HttpMethod::POST, url.clone()).with_body(json!({"name": "x"})))
            .await
            .unwrap();
    }

    assert!(dir.path().join(format!("{}.json", HISTORY_STORAGE_KEY)).exists());

    let app = app_in(dir.path());
    assert_eq!(app.history().len(), 2);
    assert_eq!(app.history()[0].method, HttpMethod::POST);
    assert_eq!(app.history()[0].status, 201);
    assert_eq!(app.history()[1].method, HttpMethod::GET);
    assert_eq!(app.history()[1].data, ResponseData::Json(json!([{"id": 1}])));
}

#[tokio::test]
async fn test_failed_request_is_not_recorded() {
    let dir = TempDir::new().unwrap();
    let server = server_with_users().await;
    let mut app = app_in(dir.path());

    let err = app
        .submit(RequestSpec::new(HttpMethod::GET, format!("{}/gone", server.uri())))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status 410: Gone for good");
    assert_eq!(app.error(), Some("Request failed with status 410: Gone for good"));
    assert!(app.response().is_none());
    assert!(app.history().is_empty());
    assert!(!dir.path().join("request_history.json").exists());
}

#[tokio::test]
async fn test_form_submission() {
    let dir = TempDir::new().unwrap();
    let server = server_with_users().await;
    let mut app = app_in(dir.path());

    let mut form = RequestForm::new();
    form.method = HttpMethod::POST;
    form.url = format!("  {}/users  ", server.uri());
    form.body = r#"{"name": "Carol"}"#.to_string();
    let row = form.headers.add();
    form.headers
        .update(row, webpost::models::HeaderField::Key, "X-Trace");
    form.headers
        .update(row, webpost::models::HeaderField::Value, "abc");

    assert!(form.validate().is_ok());
    let status = app.submit(form.to_spec()).await.unwrap().status;

    assert_eq!(status, 201);
    assert_eq!(app.history()[0].url, format!("{}/users", server.uri()));
}

#[tokio::test]
async fn test_export_import_between_stores() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let export_dir = TempDir::new().unwrap();
    let server = server_with_users().await;

    let mut source = app_in(source_dir.path());
    source
        .submit(RequestSpec::new(HttpMethod::GET, format!("{}/users", server.uri())))
        .await
        .unwrap();
    let exported = source.export_collection(export_dir.path()).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&exported).unwrap()).unwrap();
    assert!(document["name"]
        .as_str()
        .unwrap()
        .starts_with("WebPost Collection"));
    assert!(document["timestamp"].is_i64());

    let mut target = app_in(target_dir.path());
    let text = fs::read_to_string(&exported).unwrap();
    assert_eq!(target.import_collection(&text), ImportOutcome::Replaced(1));
    assert_eq!(target.history(), source.history());

    // replaced history is persisted, not only held in memory
    let reloaded = HistoryStore::load(Box::new(FileStore::new(target_dir.path())));
    assert_eq!(reloaded.entries(), source.history());
}

#[test]
fn test_import_browser_collection() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let mut app = app_in(dir.path());

    let document = json!({
        "history": [{
            "method": "GET",
            "url": "https://api.example.com/users",
            "timestamp": 1_700_000_000_000i64,
            "data": {"users": []},
            "headers": {"content-type": "application/json"},
            "status": 200,
            "statusText": "OK"
        }, {
            "method": "DELETE",
            "url": "https://api.example.com/users/1",
            "timestamp": 1_699_999_999_000i64,
            "data": "deleted",
            "headers": {},
            "status": 200,
            "statusText": "OK"
        }],
        "timestamp": 1_700_000_000_500i64,
        "name": "Exported elsewhere"
    });

    assert_eq!(
        app.import_collection(&document.to_string()),
        ImportOutcome::Replaced(2)
    );
    assert_eq!(app.history()[0].data, ResponseData::Json(json!({"users": []})));
    assert_eq!(app.history()[1].data, ResponseData::Text("deleted".to_string()));
    assert!(!app.history()[0].id.is_empty());

    assert!(app.select_history(1));
    assert_eq!(app.response().unwrap().status, 200);
    assert_eq!(app.history()[0].method, HttpMethod::GET);
}

#[test]
fn test_corrupted_history_starts_empty() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("request_history.json"), "{not a list").unwrap();

    let app = app_in(dir.path());
    assert!(app.history().is_empty());
}

#[tokio::test]
async fn test_clear_deletes_history_file() {
    let dir = TempDir::new().unwrap();
    let server = server_with_users().await;
    let mut app = app_in(dir.path());
    app.submit(RequestSpec::new(HttpMethod::GET, format!("{}/users", server.uri())))
        .await
        .unwrap();

    let file = dir.path().join("request_history.json");
    assert!(file.exists());

    app.clear_history();

    assert!(!file.exists());
    assert!(app.history().is_empty());
    assert!(app_in(dir.path()).history().is_empty());
}
