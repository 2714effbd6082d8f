//! Local directory file store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::traits::storage::{FileHandle, FileStore, StoredFile, UploadStream};

use super::path::{clean_root, resolve_within};

/// File store confined to a single local directory.
///
/// The root is created lazily by the first `put` or `list`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Absolute, lexically clean root directory.
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at the given path. Nothing is created on disk.
    pub fn new(root_path: impl AsRef<Path>) -> AppResult<Self> {
        let root_path = root_path.as_ref();
        let root = clean_root(root_path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Invalid storage root: {}", root_path.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a name to a path inside the root, logging rejected names.
    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        resolve_within(&self.root, name).inspect_err(|e| {
            if e.kind == ErrorKind::InvalidName {
                warn!(file_name = name, "Rejected file name outside store root");
            }
        })
    }

    /// Ensure the root directory exists.
    async fn ensure_root(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", self.root.display()),
                e,
            )
        })
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// Metadata of the regular file at `path`, or `NotFound`.
    async fn regular_file_len(&self, path: &Path, name: &str) -> AppResult<u64> {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            Ok(_) => Err(file_not_found(name)),
            Err(e) if is_missing(&e) => Err(file_not_found(name)),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat file: {name}"),
                e,
            )),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn put(&self, name: &str, mut stream: UploadStream<'_>) -> AppResult<StoredFile> {
        let full_path = self.resolve(name)?;
        if full_path == self.root {
            return Err(AppError::invalid_name(format!(
                "File name refers to the store root: {name}"
            )));
        }
        if is_upload_temp(name) {
            return Err(AppError::invalid_name(format!(
                "File name uses a reserved prefix: {name}"
            )));
        }
        self.ensure_parent(&full_path).await?;

        // Written beside the target and renamed over it once complete. The
        // temporary file is removed when dropped, including on cancellation.
        let parent = full_path.parent().unwrap_or(&self.root);
        let (std_file, temp_path) = upload_temp_file(parent)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create temporary file for: {name}"),
                    e,
                )
            })?
            .into_parts();
        let mut file = fs::File::from_std(std_file);

        let mut total_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| stream_error(name, e))?;
            total_bytes += chunk.len() as u64;
            file.write_all(&chunk).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, format!("Failed to write file: {name}"), e)
            })?;
        }

        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush file", e))?;
        drop(file);

        temp_path.persist(&full_path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move upload into place: {name}"),
                e.error,
            )
        })?;

        debug!(file_name = name, bytes = total_bytes, "Wrote file from stream");
        Ok(StoredFile {
            name: name.to_string(),
            size_bytes: total_bytes,
        })
    }

    async fn list(&self) -> AppResult<Vec<String>> {
        self.ensure_root().await?;

        let root = self.root.clone();
        let walk = tokio::task::spawn_blocking(move || -> AppResult<Vec<String>> {
            let mut names = Vec::new();
            for entry in WalkDir::new(&root).min_depth(1) {
                let entry = entry.map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to walk storage root", e)
                })?;
                let file_name = entry.file_name().to_string_lossy();
                if entry.file_type().is_file() && !is_upload_temp(&file_name) {
                    names.push(file_name.into_owned());
                }
            }
            Ok(names)
        });

        let mut names = walk
            .await
            .map_err(|e| AppError::internal(format!("Directory walk task failed: {e}")))??;
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> AppResult<FileHandle> {
        let full_path = self.resolve(name)?;
        let size_bytes = self.regular_file_len(&full_path, name).await?;

        let file = fs::File::open(&full_path).await.map_err(|e| {
            if is_missing(&e) {
                file_not_found(name)
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to open file: {name}"), e)
            }
        })?;

        let base_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());

        Ok(FileHandle {
            name: base_name,
            size_bytes,
            stream: Box::pin(ReaderStream::new(file)),
        })
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let full_path = self.resolve(name)?;
        self.regular_file_len(&full_path, name).await?;

        fs::remove_file(&full_path).await.map_err(|e| {
            if is_missing(&e) {
                file_not_found(name)
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {name}"),
                    e,
                )
            }
        })?;

        debug!(file_name = name, "Deleted file");
        Ok(())
    }
}

/// Prefix of in-progress upload files.
const UPLOAD_TEMP_PREFIX: &str = ".notehub-upload-";

/// Whether the base name of `name` is reserved for in-progress uploads.
fn is_upload_temp(name: &str) -> bool {
    Path::new(name)
        .file_name()
        .is_some_and(|base| base.to_string_lossy().starts_with(UPLOAD_TEMP_PREFIX))
}

/// Creates a uniquely named temporary upload file in `dir`.
fn upload_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(UPLOAD_TEMP_PREFIX).suffix(".part");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(dir)
}

fn file_not_found(name: &str) -> AppError {
    AppError::not_found(format!("File not found: {name}"))
}

/// A missing file, or a path running through something that is not a directory.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Maps a failure of the upload stream itself (not of the disk).
fn stream_error(name: &str, err: io::Error) -> AppError {
    let kind = match err.kind() {
        io::ErrorKind::FileTooLarge => ErrorKind::PayloadTooLarge,
        io::ErrorKind::InvalidData => ErrorKind::Validation,
        _ => ErrorKind::Storage,
    };
    AppError::with_source(kind, format!("Upload stream failed: {name}"), err)
}
