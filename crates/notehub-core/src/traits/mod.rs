//! Trait seams implemented by the storage crate.

pub mod storage;

pub use storage::{ByteStream, FileHandle, FileStore, StoredFile, UploadStream};
