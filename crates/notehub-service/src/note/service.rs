//! Note CRUD and administrative reset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use notehub_core::config::NotesConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_entity::note::{Note, NoteDraft, NoteId};
use notehub_storage::NoteStore;

/// Outcome of a store reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    /// Number of synthetic notes now in the store.
    pub count: usize,
}

impl ResetSummary {
    /// Human-readable confirmation, e.g. `"10000 notes initialized"`.
    pub fn message(&self) -> String {
        format!("{} notes initialized", self.count)
    }
}

/// Orchestrates the in-memory note store.
#[derive(Debug, Clone)]
pub struct NoteService {
    /// Note store.
    store: Arc<NoteStore>,
    /// Note settings.
    config: NotesConfig,
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(store: Arc<NoteStore>, config: NotesConfig) -> Self {
        Self { store, config }
    }

    /// Creates a note with a store-assigned id.
    pub async fn create_note(&self, draft: NoteDraft) -> Note {
        self.store.create(draft).await
    }

    /// Lists every note.
    pub async fn list_notes(&self) -> Vec<Note> {
        self.store.get_all().await
    }

    /// Gets a single note.
    pub async fn get_note(&self, id: NoteId) -> AppResult<Note> {
        self.store.get_by_id(id).await
    }

    /// Replaces the title and content of a note.
    pub async fn update_note(&self, id: NoteId, draft: NoteDraft) -> AppResult<Note> {
        self.store.update(id, draft).await
    }

    /// Deletes a note.
    pub async fn delete_note(&self, id: NoteId) -> AppResult<()> {
        self.store.delete(id).await
    }

    /// Replaces every note with `count` synthetic ones, or the configured
    /// default when no count is given.
    ///
    /// Counts above `reset_max_count` are rejected before the store is
    /// touched.
    pub async fn reset(&self, count: Option<usize>) -> AppResult<ResetSummary> {
        let count = count.unwrap_or(self.config.reset_default_count);
        if count > self.config.reset_max_count {
            return Err(AppError::validation(format!(
                "Reset count {count} exceeds the maximum of {}",
                self.config.reset_max_count
            )));
        }

        let count = self.store.reset(count).await;
        info!(count, "Note store reset");
        Ok(ResetSummary { count })
    }

    /// Seeds the store at startup when configured to.
    pub async fn seed_on_startup(&self) -> AppResult<Option<ResetSummary>> {
        match self.config.seed_on_startup {
            0 => Ok(None),
            count => self.reset(Some(count)).await.map(Some),
        }
    }

    /// Whether the reset endpoint should be exposed.
    pub fn reset_enabled(&self) -> bool {
        self.config.reset_endpoint_enabled
    }

    /// Number of stored notes.
    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}
