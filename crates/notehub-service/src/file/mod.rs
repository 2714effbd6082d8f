//! File upload, listing, download, and deletion.

pub mod service;

pub use service::{FileDownload, FileService};
