//! Route definitions for the NoteHub HTTP API.
//!
//! Routes are grouped by resource and merged into one router that
//! receives `AppState` via `.with_state(state)`.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, without middleware.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(note_routes())
        .merge(file_routes())
        .merge(health_routes());

    if state.note_service.reset_enabled() {
        router = router.merge(admin_routes());
    }

    router.with_state(state)
}

/// Note CRUD
fn note_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notes",
            get(handlers::note::list_notes).post(handlers::note::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::note::get_note)
                .put(handlers::note::update_note)
                .delete(handlers::note::delete_note),
        )
}

/// File upload, listing, download, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route(
            "/files/{*filename}",
            get(handlers::file::download_file).delete(handlers::file::delete_file),
        )
}

/// Bulk seeding of the note store
fn admin_routes() -> Router<AppState> {
    Router::new().route("/init_notes", post(handlers::note::reset_notes))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
