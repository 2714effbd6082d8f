//! File storage.

pub mod local;
pub mod path;

pub use local::LocalFileStore;
