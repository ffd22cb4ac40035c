//! Client error types.

use thiserror::Error;

/// Convenience alias for client return types.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the backend clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response was missing an expected field or could not be decoded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A local call was made without the state it requires.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The credential store could not be read or written.
    #[error("Credential store error: {0}")]
    Credential(String),
}

impl ClientError {
    /// HTTP status code, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable detail supplied by the server, if any.
    ///
    /// Looks for a JSON `detail` string first (the backend's error shape),
    /// then a `message` string. Non-JSON bodies yield `None`.
    pub fn detail(&self) -> Option<String> {
        let ClientError::Http { body, .. } = self else {
            return None;
        };
        let json: serde_json::Value = serde_json::from_str(body).ok()?;
        ["detail", "message"]
            .iter()
            .find_map(|key| json.get(key).and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Whether this is an authentication failure response.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ClientError {
        ClientError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn detail_prefers_detail_field() {
        let err = http(500, r#"{"detail":"Session not found","message":"other"}"#);
        assert_eq!(err.detail().as_deref(), Some("Session not found"));
    }

    #[test]
    fn detail_falls_back_to_message() {
        let err = http(400, r#"{"message":"Bad phone number"}"#);
        assert_eq!(err.detail().as_deref(), Some("Bad phone number"));
    }

    #[test]
    fn detail_ignores_non_string_and_plain_bodies() {
        assert!(http(422, r#"{"detail":[{"loc":["body"]}]}"#).detail().is_none());
        assert!(http(502, "Bad Gateway").detail().is_none());
        assert!(ClientError::Network("refused".into()).detail().is_none());
    }

    #[test]
    fn unauthorized_is_status_based() {
        assert!(http(401, "").is_unauthorized());
        assert!(!http(403, "").is_unauthorized());
        assert!(!ClientError::Protocol("x".into()).is_unauthorized());
    }
}
