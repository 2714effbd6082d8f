//! Note entity model.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a note by the store.
pub type NoteId = u64;

/// A text record held in memory by the note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier, immutable after creation.
    pub id: NoteId,
    /// Note title. May be empty.
    pub title: String,
    /// Note body. May be empty.
    pub content: String,
}

/// The caller-supplied part of a note, used for create and update.
///
/// Missing fields deserialize as empty strings; an `id` in the payload is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    /// Note title.
    #[serde(default)]
    pub title: String,
    /// Note body.
    #[serde(default)]
    pub content: String,
}

impl NoteDraft {
    /// Creates a draft from a title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Binds the draft to a store-assigned id.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
        }
    }
}
