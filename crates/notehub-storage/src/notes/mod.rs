//! Note storage.

pub mod memory;

pub use memory::NoteStore;
