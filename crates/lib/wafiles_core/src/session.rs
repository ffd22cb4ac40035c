//! WhatsApp session client.
//!
//! Proxies session lifecycle calls to the backend and remembers at most one
//! session id. Creating a new session forgets the previous id without
//! closing it server-side.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::DEFAULT_LIVENESS_TIMEOUT;
use crate::error::{ClientError, ClientResult};
use crate::models::file::FileDescriptor;
use crate::models::session::{
    Ack, CreateSessionResponse, Session, SessionStatus, SessionStatusReport,
};
use crate::transport::AuthTransport;

const SESSION_PATH: &str = "/whatsapp/session";
const DOWNLOAD_PATH: &str = "/whatsapp/download";
/// Served at the host root, outside the API prefix.
const LIVENESS_PATH: &str = "/";

/// Body of `POST /whatsapp/download`.
#[derive(Deserialize)]
struct DownloadResponse {
    #[serde(default)]
    files: Option<DownloadedFiles>,
}

/// The backend either lists descriptors directly or wraps its scan result.
#[derive(Deserialize)]
#[serde(untagged)]
enum DownloadedFiles {
    List(Vec<FileDescriptor>),
    Scan {
        #[serde(default)]
        files: Vec<FileDescriptor>,
    },
}

/// Client for the `/whatsapp` resources.
pub struct SessionClient {
    transport: Arc<AuthTransport>,
    current: Mutex<Option<String>>,
    liveness_timeout: Duration,
}

impl SessionClient {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self::with_liveness_timeout(transport, DEFAULT_LIVENESS_TIMEOUT)
    }

    pub fn with_liveness_timeout(transport: Arc<AuthTransport>, liveness_timeout: Duration) -> Self {
        Self {
            transport,
            current: Mutex::new(None),
            liveness_timeout,
        }
    }

    /// Id of the session this client currently holds.
    pub fn current_session_id(&self) -> Option<String> {
        self.current.lock().ok().and_then(|guard| guard.clone())
    }

    /// Start a new WhatsApp session and hold its id.
    pub async fn create_session(&self) -> ClientResult<Session> {
        let resp: CreateSessionResponse = self.transport.post_empty(SESSION_PATH).await?;

        let Some(id) = resp.session_id.filter(|id| !id.is_empty()) else {
            let reason = resp
                .error
                .unwrap_or_else(|| "response has no session_id".to_string());
            return Err(ClientError::Protocol(format!(
                "session creation failed: {reason}"
            )));
        };

        let status = if resp.already_authenticated {
            SessionStatus::Connected
        } else {
            SessionStatus::Pending
        };

        self.set_current(Some(id.clone()));
        info!(session_id = %id, %status, "WhatsApp session created");

        Ok(Session {
            id,
            status,
            qr_data: resp.qr_data,
        })
    }

    /// Poll the status of `id`, or of the held session when `id` is `None`.
    pub async fn get_status(&self, id: Option<&str>) -> ClientResult<SessionStatusReport> {
        let id = self.resolve_id(id)?;
        self.transport
            .get(&format!("{SESSION_PATH}/{id}"))
            .await
    }

    /// Close `id`, or the held session when `id` is `None`.
    ///
    /// The held id is forgotten only when it is the one being closed.
    pub async fn close_session(&self, id: Option<&str>) -> ClientResult<Ack> {
        let id = self.resolve_id(id)?;
        let ack: Ack = self
            .transport
            .delete(&format!("{SESSION_PATH}/{id}"))
            .await?;

        if let Ok(mut guard) = self.current.lock()
            && guard.as_deref() == Some(id.as_str())
        {
            *guard = None;
        }
        info!(session_id = %id, "WhatsApp session closed");
        Ok(ack)
    }

    /// Ask the backend to fetch newly available attachments.
    ///
    /// A response without a `files` field means nothing was downloaded.
    pub async fn download_files(&self) -> ClientResult<Vec<FileDescriptor>> {
        let resp: DownloadResponse = self.transport.post_empty(DOWNLOAD_PATH).await?;
        let files = match resp.files {
            Some(DownloadedFiles::List(files)) => files,
            Some(DownloadedFiles::Scan { files }) => files,
            None => Vec::new(),
        };
        debug!(count = files.len(), "download finished");
        Ok(files)
    }

    /// Best-effort liveness check. Never fails; any error reads as `false`.
    pub async fn check_availability(&self) -> bool {
        let url = self.transport.origin_url(LIVENESS_PATH);
        self.transport.is_reachable(&url, self.liveness_timeout).await
    }

    fn resolve_id(&self, id: Option<&str>) -> ClientResult<String> {
        id.map(str::to_string)
            .or_else(|| self.current_session_id())
            .ok_or_else(|| ClientError::Precondition("No active session".to_string()))
    }

    /// Replace the held id, e.g. with one remembered from an earlier run.
    pub fn set_current_session_id(&self, id: Option<String>) {
        self.set_current(id);
    }

    fn set_current(&self, id: Option<String>) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = id;
        }
    }
}
