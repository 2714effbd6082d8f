//! Note store configuration.

use serde::{Deserialize, Serialize};

/// In-memory note store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Number of synthetic notes to create when the server starts.
    #[serde(default)]
    pub seed_on_startup: usize,
    /// Whether `POST /init_notes` is routed.
    #[serde(default = "default_true")]
    pub reset_endpoint_enabled: bool,
    /// Notes created by a reset when the request names no count.
    #[serde(default = "default_reset_count")]
    pub reset_default_count: usize,
    /// Largest count a single reset may create. Larger requests are rejected.
    #[serde(default = "default_reset_max_count")]
    pub reset_max_count: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            seed_on_startup: 0,
            reset_endpoint_enabled: true,
            reset_default_count: default_reset_count(),
            reset_max_count: default_reset_max_count(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_reset_count() -> usize {
    10_000
}

fn default_reset_max_count() -> usize {
    100_000
}
