//! Convenience result type alias for NoteHub.

use crate::error::AppError;

/// A specialized `Result` type for NoteHub operations.
pub type AppResult<T> = Result<T, AppError>;
