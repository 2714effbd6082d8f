//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use notehub_core::config::AppConfig;
use notehub_core::traits::storage::FileStore;
use notehub_service::{FileService, NoteService};
use notehub_storage::NoteStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Note service
    pub note_service: Arc<NoteService>,
    /// File service
    pub file_service: Arc<FileService>,
    /// When the server was started
    pub started_at: Instant,
}

impl AppState {
    /// Wires services around the two stores.
    pub fn new(config: AppConfig, notes: Arc<NoteStore>, files: Arc<dyn FileStore>) -> Self {
        let note_service = Arc::new(NoteService::new(notes, config.notes.clone()));
        let file_service = Arc::new(FileService::new(files));

        Self {
            config: Arc::new(config),
            note_service,
            file_service,
            started_at: Instant::now(),
        }
    }
}
