//! In-memory note store.
//!
//! All notes and the id counter live in a single table behind one
//! `RwLock`. Mutations take the write lock, reads take the read lock, so a
//! read-all always observes a consistent snapshot.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::debug;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_entity::note::{Note, NoteDraft, NoteId};

/// Length of a synthetic title produced by [`NoteStore::reset`].
pub const SYNTHETIC_TITLE_LEN: usize = 10;
/// Length of a synthetic content body produced by [`NoteStore::reset`].
pub const SYNTHETIC_CONTENT_LEN: usize = 100;

#[derive(Debug)]
struct NoteTable {
    notes: BTreeMap<NoteId, Note>,
    next_id: NoteId,
}

impl NoteTable {
    fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Assigns the next id and inserts the note. Ids are never reused.
    fn insert(&mut self, draft: NoteDraft) -> Note {
        let id = self.next_id;
        self.next_id += 1;

        let note = draft.into_note(id);
        self.notes.insert(id, note.clone());
        note
    }
}

/// Process-wide note store with monotonically assigned ids.
#[derive(Debug)]
pub struct NoteStore {
    table: RwLock<NoteTable>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    /// Creates an empty store whose first note gets id 1.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(NoteTable::new()),
        }
    }

    /// Stores a new note under a fresh id and returns it.
    pub async fn create(&self, draft: NoteDraft) -> Note {
        let note = self.table.write().await.insert(draft);
        debug!(note_id = note.id, "Created note");
        note
    }

    /// Snapshot of every stored note, in ascending id order.
    pub async fn get_all(&self) -> Vec<Note> {
        self.table.read().await.notes.values().cloned().collect()
    }

    /// Looks up a single note.
    pub async fn get_by_id(&self, id: NoteId) -> AppResult<Note> {
        self.table
            .read()
            .await
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| note_not_found(id))
    }

    /// Replaces title and content of an existing note.
    pub async fn update(&self, id: NoteId, draft: NoteDraft) -> AppResult<Note> {
        let mut table = self.table.write().await;
        let note = table.notes.get_mut(&id).ok_or_else(|| note_not_found(id))?;

        note.title = draft.title;
        note.content = draft.content;

        debug!(note_id = id, "Updated note");
        Ok(note.clone())
    }

    /// Removes a note. Deleting an absent id is `NotFound`, every time.
    pub async fn delete(&self, id: NoteId) -> AppResult<()> {
        let removed = self.table.write().await.notes.remove(&id);
        match removed {
            Some(_) => {
                debug!(note_id = id, "Deleted note");
                Ok(())
            }
            None => Err(note_not_found(id)),
        }
    }

    /// Clears the store and creates `count` synthetic notes.
    ///
    /// The counter is not rewound: seeded notes take the next ids in
    /// sequence, exactly as `create` would assign them.
    pub async fn reset(&self, count: usize) -> usize {
        let mut table = self.table.write().await;
        table.notes.clear();

        for i in 1..=count {
            table.insert(NoteDraft::new(
                repeat_to_length(&format!("Title {i}"), SYNTHETIC_TITLE_LEN),
                repeat_to_length(&format!("Content {i}"), SYNTHETIC_CONTENT_LEN),
            ));
        }

        debug!(count, next_id = table.next_id, "Reset note store");
        table.notes.len()
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.table.read().await.notes.len()
    }

    /// Whether the store holds no notes.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.notes.is_empty()
    }
}

fn note_not_found(id: NoteId) -> AppError {
    AppError::not_found(format!("Note not found: {id}"))
}

/// Repeats `base` and cuts the result to exactly `len` characters.
fn repeat_to_length(base: &str, len: usize) -> String {
    base.chars().cycle().take(len).collect()
}
