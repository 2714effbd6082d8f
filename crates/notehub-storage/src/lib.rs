//! # notehub-storage
//!
//! Store implementations for NoteHub: the in-memory [`NoteStore`] and the
//! local directory [`LocalFileStore`].

pub mod files;
pub mod notes;

pub use files::LocalFileStore;
pub use notes::NoteStore;
