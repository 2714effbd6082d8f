//! Request DTOs.
//!
//! Note bodies deserialize straight into [`notehub_entity::note::NoteDraft`].

use serde::{Deserialize, Serialize};

/// Query parameters for `POST /init_notes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetParams {
    /// Number of synthetic notes; the configured default when absent.
    pub count: Option<usize>,
}
