//! File list state slice.
//!
//! Three async operations (fetch, create, sync) each move the projection
//! through pending → fulfilled | rejected. Every phase is applied with a
//! single `send_modify`, so observers never see a half-applied transition.
//!
//! Overlapping operations of the same kind are not fenced: whichever
//! response settles last is what the state shows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::files::FileClient;
use crate::models::file::{FileCreateData, FileRecord, SyncResult};

const FETCH_FAILED: &str = "Failed to fetch files";
const CREATE_FAILED: &str = "Failed to create file";
const SYNC_FAILED: &str = "Failed to sync files";

/// Progress of the most recent sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncStatus {
    pub syncing: bool,
    pub last_synced: Option<DateTime<Utc>>,
    pub result: Option<SyncResult>,
}

/// Client-visible projection of the file resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilesState {
    /// Records in server order.
    pub files: Vec<FileRecord>,
    /// A fetch or create is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub sync_status: SyncStatus,
}

/// Which in-flight flag an operation drives.
#[derive(Clone, Copy)]
enum Flag {
    Loading,
    Syncing,
}

impl Flag {
    fn set(self, state: &mut FilesState, value: bool) {
        match self {
            Flag::Loading => state.loading = value,
            Flag::Syncing => state.sync_status.syncing = value,
        }
    }
}

/// Store owning the [`FilesState`] projection.
pub struct FilesStore {
    client: Arc<FileClient>,
    state: watch::Sender<FilesState>,
}

impl FilesStore {
    pub fn new(client: Arc<FileClient>) -> Self {
        let (state, _) = watch::channel(FilesState::default());
        Self { client, state }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> FilesState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every transition.
    pub fn subscribe(&self) -> watch::Receiver<FilesState> {
        self.state.subscribe()
    }

    /// Load the file list, replacing `files` wholesale.
    pub async fn fetch(&self, phone_number: Option<&str>) -> ClientResult<()> {
        self.pending(Flag::Loading);
        match self.client.list(phone_number).await {
            Ok(files) => {
                debug!(count = files.len(), "fetch fulfilled");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.files = files;
                });
                Ok(())
            }
            Err(e) => Err(self.rejected(Flag::Loading, e, FETCH_FAILED)),
        }
    }

    /// Create a record and append the server's version to `files`.
    pub async fn create(&self, data: &FileCreateData) -> ClientResult<FileRecord> {
        self.pending(Flag::Loading);
        match self.client.create(data).await {
            Ok(record) => {
                debug!(id = %record.id, "create fulfilled");
                let appended = record.clone();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.files.push(appended);
                });
                Ok(record)
            }
            Err(e) => Err(self.rejected(Flag::Loading, e, CREATE_FAILED)),
        }
    }

    /// Run a server-side sync. `files` is left untouched; fetch again to see
    /// newly synced records.
    pub async fn sync(&self) -> ClientResult<SyncResult> {
        self.pending(Flag::Syncing);
        match self.client.sync().await {
            Ok(result) => {
                debug!(files_synced = result.files_synced, "sync fulfilled");
                let stored = result.clone();
                self.state.send_modify(|s| {
                    s.sync_status.syncing = false;
                    s.sync_status.last_synced = Some(Utc::now());
                    s.sync_status.result = Some(stored);
                });
                Ok(result)
            }
            Err(e) => Err(self.rejected(Flag::Syncing, e, SYNC_FAILED)),
        }
    }

    /// Dismiss the current error. Local only.
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    fn pending(&self, flag: Flag) {
        self.state.send_modify(|s| {
            s.error = None;
            flag.set(s, true);
        });
    }

    fn rejected(&self, flag: Flag, err: ClientError, fallback: &str) -> ClientError {
        let message = display_message(&err, fallback);
        debug!(%message, "operation rejected: {err}");
        self.state.send_modify(|s| {
            flag.set(s, false);
            s.error = Some(message);
        });
        err
    }
}

/// Message shown for a failure: server detail when present, else `fallback`.
pub fn display_message(err: &ClientError, fallback: &str) -> String {
    err.detail().unwrap_or_else(|| fallback.to_string())
}
