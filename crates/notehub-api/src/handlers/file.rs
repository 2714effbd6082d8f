//! File upload, list, download, and delete handlers.

use std::io;

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures::StreamExt;

use notehub_core::error::AppError;

use crate::dto::response::{MessageResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::ApiPath;
use crate::state::AppState;

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "file";

/// POST /files: multipart upload, streamed to disk.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| AppError::validation("Uploaded file has no file name"))?;

        let stream = field.map(|chunk| chunk.map_err(field_io_error));
        let stored = state
            .file_service
            .upload(&file_name, Box::pin(stream))
            .await?;

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: stored.name,
            size_bytes: stored.size_bytes,
        }));
    }

    Err(AppError::validation("No file provided").into())
}

/// GET /files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.file_service.list_files().await?))
}

/// GET /files/{*filename}
pub async fn download_file(
    State(state): State<AppState>,
    ApiPath(filename): ApiPath<String>,
) -> Result<Response, ApiError> {
    let download = state.file_service.download(&filename).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&download.filename),
        )
        .header(header::CONTENT_LENGTH, download.size_bytes)
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /files/{*filename}
pub async fn delete_file(
    State(state): State<AppState>,
    ApiPath(filename): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.delete_file(&filename).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(err.body_text())
    } else {
        AppError::validation(format!("Multipart error: {}", err.body_text()))
    }
}

/// Carries a multipart read failure through the store's byte stream.
fn field_io_error(err: MultipartError) -> io::Error {
    let kind = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        io::ErrorKind::FileTooLarge
    } else {
        io::ErrorKind::InvalidData
    };
    io::Error::new(kind, err.body_text())
}

/// `attachment` disposition; non-ASCII names also get an RFC 5987 `filename*`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        return format!("attachment; filename=\"{filename}\"");
    }

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
