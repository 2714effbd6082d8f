//! Request/response logging middleware.
//!
//! Each request is logged once, after the response, with the note id or file
//! name it addresses when the path carries one.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Logs method, path, addressed note or file, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    let note_id = note_id_of(&path);
    let file_name = file_name_of(&path);

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            note_id,
            file_name,
            status = status.as_u16(),
            duration_ms,
            "HTTP request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            note_id,
            file_name,
            status = status.as_u16(),
            duration_ms,
            "HTTP request"
        );
    }

    response
}

/// Note id addressed by `/notes/{id}`.
fn note_id_of(path: &str) -> Option<u64> {
    path.strip_prefix("/notes/")?.parse().ok()
}

/// File name addressed by `/files/{*filename}`, still percent-encoded.
fn file_name_of(path: &str) -> Option<&str> {
    path.strip_prefix("/files/").filter(|name| !name.is_empty())
}
