//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Upload confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Message.
    pub message: String,
    /// Name the file was stored under.
    pub filename: String,
    /// Bytes written.
    pub size_bytes: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Notes currently held in memory.
    pub notes: usize,
    /// Seconds since startup.
    pub uptime_seconds: u64,
}
