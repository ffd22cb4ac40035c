//! WhatsApp session models.

use serde::{Deserialize, Serialize};

/// Connectivity state of a WhatsApp session as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SessionStatus {
    /// Waiting for the QR code to be scanned.
    Pending,
    Connected,
    Disconnected,
    Error,
}

impl From<&str> for SessionStatus {
    fn from(s: &str) -> Self {
        match s {
            "authenticated" | "connected" => SessionStatus::Connected,
            "not_authenticated" | "pending" => SessionStatus::Pending,
            "not_found" | "disconnected" | "inactive" | "expired" => SessionStatus::Disconnected,
            _ => SessionStatus::Error,
        }
    }
}

impl From<String> for SessionStatus {
    fn from(s: String) -> Self {
        SessionStatus::from(s.as_str())
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Connected => "connected",
            SessionStatus::Disconnected => "disconnected",
            SessionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Server-tracked WhatsApp connectivity handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: String,
    pub status: SessionStatus,
    /// QR payload to scan when the session still needs pairing.
    pub qr_data: Option<String>,
}

/// Status poll payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatusReport {
    pub status: SessionStatus,
    #[serde(default)]
    pub qr_available: bool,
    #[serde(default)]
    pub qr_data: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement returned by lifecycle calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// Raw body of `POST /whatsapp/session`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateSessionResponse {
    pub session_id: Option<String>,
    #[serde(default)]
    pub qr_data: Option<String>,
    #[serde(default)]
    pub already_authenticated: bool,
    #[serde(default)]
    pub error: Option<String>,
}
