//! Note operations.

pub mod service;

pub use service::{NoteService, ResetSummary};
