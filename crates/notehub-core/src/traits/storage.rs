//! File store trait for name-addressed whole-file storage.

use std::path::Path;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

use crate::result::AppResult;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A byte stream borrowed from the request that carries an upload.
pub type UploadStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Outcome of a successful [`FileStore::put`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredFile {
    /// The name the file was stored under.
    pub name: String,
    /// Number of bytes written.
    pub size_bytes: u64,
}

/// An open, readable stored file.
pub struct FileHandle {
    /// Base name of the file, suitable for a `Content-Disposition` header.
    pub name: String,
    /// Size of the file when it was opened.
    pub size_bytes: u64,
    /// The file content.
    pub stream: ByteStream,
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Trait for file storage backends confined to a single root directory.
///
/// Names are resolved against the root and must stay inside it; a name that
/// escapes is rejected with `ErrorKind::InvalidName` before anything on disk
/// changes.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// The directory all names are resolved against.
    fn root(&self) -> &Path;

    /// Store the full stream under `name`, replacing any existing content.
    async fn put(&self, name: &str, stream: UploadStream<'_>) -> AppResult<StoredFile>;

    /// Base names of every regular file below the root.
    async fn list(&self) -> AppResult<Vec<String>>;

    /// Open a stored file for reading.
    async fn get(&self, name: &str) -> AppResult<FileHandle>;

    /// Remove a stored file.
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Store an in-memory buffer under `name`.
    async fn put_bytes(&self, name: &str, data: Bytes) -> AppResult<StoredFile> {
        let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(data) });
        self.put(name, Box::pin(stream)).await
    }

    /// Read a stored file fully into memory.
    async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        let mut handle = self.get(name).await?;
        let mut buf = BytesMut::with_capacity(handle.size_bytes as usize);
        while let Some(chunk) = handle.stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}
