//! File resource models.

use serde::{Deserialize, Serialize};

/// Metadata for one attachment mirrored into the backend.
///
/// The server is authoritative for `id`, `storage_path`, `uploaded` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub filename: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub storage_path: String,
    #[serde(default)]
    pub uploaded: bool,
    pub created_at: String,
}

/// Subset of fields a client may submit when creating a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCreateData {
    pub filename: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileCreateData {
    pub fn new(filename: &str, phone_number: &str) -> Self {
        Self {
            filename: filename.to_string(),
            phone_number: phone_number.to_string(),
            size: None,
            mime_type: None,
        }
    }
}

/// Summary of one server-side sync pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    pub message: String,
    pub files_synced: u64,
    /// Omitted by the backend when nothing was missing.
    #[serde(default)]
    pub total_missing: u64,
}

/// Attachment discovered by a WhatsApp download scan.
///
/// Scans report heterogeneous metadata, so only the common fields are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of pushing one file to object storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub success: bool,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
