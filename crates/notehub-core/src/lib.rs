//! # notehub-core
//!
//! Core crate for NoteHub. Contains configuration schemas, the file store
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other NoteHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
