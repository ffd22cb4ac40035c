//! File resource client.
//!
//! Each call is a single round trip. Nothing is cached, paginated or
//! retried here; failures reach the caller unchanged.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::ClientResult;
use crate::models::file::{FileCreateData, FileRecord, SyncResult};
use crate::transport::AuthTransport;

const FILES_PATH: &str = "/files";
const SYNC_PATH: &str = "/files/sync";

/// Optional server-side phone number filter.
#[derive(Serialize)]
pub(crate) struct PhoneFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<&'a str>,
}

/// Client for the `/files` resource.
pub struct FileClient {
    transport: Arc<AuthTransport>,
}

impl FileClient {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    /// List files visible to the account, optionally for one phone number.
    pub async fn list(&self, phone_number: Option<&str>) -> ClientResult<Vec<FileRecord>> {
        let files: Vec<FileRecord> = self
            .transport
            .get_query(FILES_PATH, &PhoneFilter { phone_number })
            .await?;
        debug!(count = files.len(), phone_number, "listed files");
        Ok(files)
    }

    /// Create a record; the returned value carries the server-assigned fields.
    pub async fn create(&self, data: &FileCreateData) -> ClientResult<FileRecord> {
        self.transport.post_json(FILES_PATH, data).await
    }

    /// Trigger server-side reconciliation of not-yet-uploaded files.
    ///
    /// Only the summary comes back; call [`FileClient::list`] for fresh records.
    pub async fn sync(&self) -> ClientResult<SyncResult> {
        self.transport.post_empty(SYNC_PATH).await
    }
}
