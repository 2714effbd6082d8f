//! Integration tests for file operations.

use axum::http::{StatusCode, header};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_then_download() {
    let app = TestApp::new().await;

    let uploaded = app.upload("a.txt", b"hello world").await;
    assert_eq!(uploaded.status, StatusCode::OK);
    assert_eq!(
        uploaded.body,
        json!({
            "message": "File uploaded successfully",
            "filename": "a.txt",
            "size_bytes": 11
        })
    );

    let download = app.request("GET", "/files/a.txt", None).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(&download.raw[..], b"hello world");
    assert_eq!(download.headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        download.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"a.txt\""
    );
}

#[tokio::test]
async fn test_upload_overwrites() {
    let app = TestApp::new().await;
    app.upload("a.txt", b"first version").await;
    app.upload("a.txt", b"second").await;

    let download = app.request("GET", "/files/a.txt", None).await;
    assert_eq!(&download.raw[..], b"second");
}

#[tokio::test]
async fn test_list_files() {
    let app = TestApp::new().await;

    let empty = app.request("GET", "/files", None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body, json!([]));

    app.upload("b.txt", b"b").await;
    app.upload("a.txt", b"a").await;

    let listed = app.request("GET", "/files", None).await;
    assert_eq!(listed.body, json!(["a.txt", "b.txt"]));
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new().await;
    app.upload("a.txt", b"a").await;

    let deleted = app.request("DELETE", "/files/a.txt", None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({"message": "File deleted successfully"}));

    assert_eq!(
        app.request("GET", "/files/a.txt", None).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.request("GET", "/files", None).await.body, json!([]));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let app = TestApp::new().await;

    let get = app.request("GET", "/files/missing.txt", None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.error_code(), Some("NOT_FOUND"));

    let delete = app.request("DELETE", "/files/missing.txt", None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let app = TestApp::new().await;
    std::fs::write(app.dir.path().join("secret"), b"top secret").unwrap();

    let get = app.request("GET", "/files/..%2Fsecret", None).await;
    assert_eq!(get.status, StatusCode::BAD_REQUEST);
    assert_eq!(get.error_code(), Some("INVALID_NAME"));

    let delete = app.request("DELETE", "/files/..%2Fsecret", None).await;
    assert_eq!(delete.status, StatusCode::BAD_REQUEST);
    assert!(app.dir.path().join("secret").exists());
}

#[tokio::test]
async fn test_nested_name_round_trip() {
    let app = TestApp::new().await;
    std::fs::create_dir_all(app.dir.path().join("uploads/docs")).unwrap();
    std::fs::write(app.dir.path().join("uploads/docs/readme.txt"), b"# hi").unwrap();

    let download = app.request("GET", "/files/docs/readme.txt", None).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(&download.raw[..], b"# hi");
    assert_eq!(download.headers[header::CONTENT_TYPE], "text/plain");

    let listed = app.request("GET", "/files", None).await;
    assert_eq!(listed.body, json!(["readme.txt"]));
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::new().await;

    let response = app.upload_field("attachment", "a.txt", b"data").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
    assert_eq!(app.request("GET", "/files", None).await.body, json!([]));
}

#[tokio::test]
async fn test_upload_over_limit() {
    let app = TestApp::with_config(|config| config.storage.max_upload_size_bytes = 64).await;

    let response = app.upload("big.bin", &[7u8; 4096]).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.request("GET", "/files", None).await.body, json!([]));
}

#[tokio::test]
async fn test_upload_traversal_name_rejected() {
    let app = TestApp::new().await;

    let response = app.upload("../escape.txt", b"outside").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_NAME"));
    assert!(!app.dir.path().join("escape.txt").exists());
    assert!(!app.dir.path().join("uploads").exists());
}

#[tokio::test]
async fn test_timed_out_upload_keeps_existing_file() {
    let app = TestApp::with_config(|config| config.server.request_timeout_seconds = 1).await;
    app.upload("keep.txt", b"original content").await;

    let response = app.upload_stalled("keep.txt", b"partial").await;
    assert_eq!(response.status, StatusCode::REQUEST_TIMEOUT);

    let download = app.request("GET", "/files/keep.txt", None).await;
    assert_eq!(&download.raw[..], b"original content");
    assert_eq!(app.request("GET", "/files", None).await.body, json!(["keep.txt"]));
    assert_eq!(
        std::fs::read_dir(app.dir.path().join("uploads")).unwrap().count(),
        1
    );
}
