//! File service: uploads, listing, downloads, deletion.

use std::sync::Arc;

use tracing::info;

use notehub_core::result::AppResult;
use notehub_core::traits::storage::{ByteStream, FileStore, StoredFile, UploadStream};

/// A stored file opened for download.
pub struct FileDownload {
    /// Suggested filename for `Content-Disposition`.
    pub filename: String,
    /// MIME type for `Content-Type`.
    pub content_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// File content.
    pub stream: ByteStream,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Orchestrates the file store.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Backing store.
    store: Arc<dyn FileStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Stores an uploaded stream under `name`, replacing any existing file.
    pub async fn upload(&self, name: &str, stream: UploadStream<'_>) -> AppResult<StoredFile> {
        let stored = self.store.put(name, stream).await?;
        info!(file_name = %stored.name, bytes = stored.size_bytes, "File uploaded");
        Ok(stored)
    }

    /// Names of every stored file.
    pub async fn list_files(&self) -> AppResult<Vec<String>> {
        self.store.list().await
    }

    /// Opens a stored file for download.
    pub async fn download(&self, name: &str) -> AppResult<FileDownload> {
        let handle = self.store.get(name).await?;
        Ok(FileDownload {
            content_type: mime_guess::from_path(&handle.name)
                .first_or_octet_stream()
                .to_string(),
            filename: handle.name,
            size_bytes: handle.size_bytes,
            stream: handle.stream,
        })
    }

    /// Deletes a stored file.
    pub async fn delete_file(&self, name: &str) -> AppResult<()> {
        self.store.delete(name).await?;
        info!(file_name = name, "File deleted");
        Ok(())
    }
}
