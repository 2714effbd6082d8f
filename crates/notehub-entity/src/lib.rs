//! # notehub-entity
//!
//! Domain entity models for NoteHub. Every struct in this crate derives
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod note;
