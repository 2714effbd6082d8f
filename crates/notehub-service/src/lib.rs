//! # notehub-service
//!
//! Service layer for NoteHub. Handlers talk to these services, which
//! wrap the stores with logging, seeding, and download metadata.

pub mod file;
pub mod note;

pub use file::FileService;
pub use note::NoteService;
