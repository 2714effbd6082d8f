//! Note CRUD and reset handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use notehub_entity::note::{Note, NoteDraft, NoteId};

use crate::dto::request::ResetParams;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NoteDraft>,
) -> (StatusCode, Json<Note>) {
    let note = state.note_service.create_note(draft).await;
    (StatusCode::CREATED, Json(note))
}

/// GET /notes
pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    Json(state.note_service.list_notes().await)
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NoteId>,
) -> Result<Json<Note>, ApiError> {
    let note = state.note_service.get_note(id).await?;
    Ok(Json(note))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NoteId>,
    ApiJson(draft): ApiJson<NoteDraft>,
) -> Result<Json<Note>, ApiError> {
    let note = state.note_service.update_note(id, draft).await?;
    Ok(Json(note))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NoteId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.note_service.delete_note(id).await?;
    Ok(Json(MessageResponse::new("Note deleted")))
}

/// POST /init_notes?count=N
pub async fn reset_notes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ResetParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let summary = state.note_service.reset(params.count).await?;
    Ok(Json(MessageResponse::new(summary.message())))
}
