//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use futures::StreamExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use notehub_api::{AppState, build_app};
use notehub_core::config::AppConfig;
use notehub_storage::{LocalFileStore, NoteStore};

/// Boundary used by [`TestApp::upload`].
const BOUNDARY: &str = "notehub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum app (router + middleware) for making test requests
    pub router: Router,
    /// Keeps the storage directory alive for the test's duration
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application with default settings
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.root_path = dir.path().join("uploads").display().to_string();
        adjust(&mut config);

        let file_store = LocalFileStore::new(&config.storage.root_path)
            .expect("Failed to init file store");
        let state = AppState::new(
            config,
            Arc::new(NoteStore::new()),
            Arc::new(file_store),
        );
        state
            .note_service
            .seed_on_startup()
            .await
            .expect("Failed to seed notes");

        Self {
            router: build_app(state),
            dir,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `data` as the multipart field `file` named `filename`
    pub async fn upload(&self, filename: &str, data: &[u8]) -> TestResponse {
        self.upload_field("file", filename, data).await
    }

    /// Upload `data` under an arbitrary multipart field name
    pub async fn upload_field(&self, field: &str, filename: &str, data: &[u8]) -> TestResponse {
        let mut body = part_head(field, filename);
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/files")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Start an upload of `filename` whose body sends `prefix` and then
    /// stalls without ever finishing
    pub async fn upload_stalled(&self, filename: &str, prefix: &[u8]) -> TestResponse {
        let mut head = part_head("file", filename);
        head.extend_from_slice(prefix);

        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![Ok(Bytes::from(head))];
        let body = futures::stream::iter(chunks).chain(futures::stream::pending());

        let req = Request::builder()
            .method("POST")
            .uri("/files")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from_stream(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

/// Opening boundary and headers of a multipart file part
fn part_head(field: &str, filename: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body bytes
    pub raw: Bytes,
}

impl TestResponse {
    /// The `error` code of an error response body
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
