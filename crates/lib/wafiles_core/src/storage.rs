//! Object storage client.

use std::sync::Arc;

use tracing::info;

use crate::error::ClientResult;
use crate::files::PhoneFilter;
use crate::models::file::{FileRecord, UploadOutcome};
use crate::transport::AuthTransport;

const STORAGE_PATH: &str = "/storage";

/// Client for the `/storage` resource.
pub struct StorageClient {
    transport: Arc<AuthTransport>,
}

impl StorageClient {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    /// Push one recorded file to object storage.
    ///
    /// A failed upload is reported in the outcome (`success == false`), not
    /// as an error; only transport failures are errors.
    pub async fn upload(&self, file_id: &str) -> ClientResult<UploadOutcome> {
        let outcome: UploadOutcome = self
            .transport
            .post_empty(&format!("{STORAGE_PATH}/{file_id}"))
            .await?;
        info!(file_id, success = outcome.success, "storage upload");
        Ok(outcome)
    }

    /// Files as seen by the storage service.
    pub async fn list(&self, phone_number: Option<&str>) -> ClientResult<Vec<FileRecord>> {
        self.transport
            .get_query(&format!("{STORAGE_PATH}/"), &PhoneFilter { phone_number })
            .await
    }
}
