//! Path containment for the file store.
//!
//! A name is joined to the root and normalized lexically first (`.` dropped,
//! `..` pops, an absolute name replaces the base), then both sides are
//! canonicalized so a symlink cannot lead out of the root either.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use notehub_core::error::AppError;
use notehub_core::result::AppResult;

/// Joins `rel` onto `base` and removes `.` and `..` components without
/// touching the filesystem.
pub fn lexical_join(base: &Path, rel: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in rel.components() {
        match component {
            Component::Prefix(prefix) => out = PathBuf::from(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Absolute, lexically clean form of a store root.
pub fn clean_root(root: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(root)?;
    Ok(lexical_join(Path::new(""), &absolute))
}

/// Canonicalizes the longest existing prefix of `path` and re-appends the
/// components that do not exist yet.
///
/// `path` must already be lexically clean, so the re-appended tail holds no
/// `..` components.
pub fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        match dunce::canonicalize(existing) {
            Ok(mut canonical) => {
                for part in missing.iter().rev() {
                    canonical.push(part);
                }
                return Ok(canonical);
            }
            Err(err) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Err(err),
            },
        }
    }
}

/// Resolves `name` against `root`, rejecting anything that lands outside it.
///
/// `root` must be the output of [`clean_root`]. The returned path is the
/// lexical resolution, which is what callers open or create.
pub fn resolve_within(root: &Path, name: &str) -> AppResult<PathBuf> {
    if name.is_empty() || name.contains('\0') {
        return Err(AppError::invalid_name(format!("Invalid file name: {name:?}")));
    }

    let resolved = lexical_join(root, Path::new(name));
    if !resolved.starts_with(root) {
        return Err(escapes_root(name));
    }

    let canonical_root = canonicalize_existing_prefix(root)?;
    let canonical = canonicalize_existing_prefix(&resolved)?;
    if !canonical.starts_with(&canonical_root) {
        return Err(escapes_root(name));
    }

    Ok(resolved)
}

fn escapes_root(name: &str) -> AppError {
    AppError::invalid_name(format!("File name escapes the store root: {name}"))
}
