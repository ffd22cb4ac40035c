//! Client configuration.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend API URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default bounded wait for the liveness check.
pub const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the backend clients.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the REST backend (no trailing slash).
    pub api_url: String,
    /// Hosted backend-as-a-service endpoint. Carried, never interpreted.
    pub supabase_url: Option<String>,
    /// Hosted backend-as-a-service key. Carried, never interpreted.
    pub supabase_key: Option<String>,
    /// Where the file-backed credential store keeps the bearer token.
    pub credential_path: PathBuf,
    /// Where a front-end may remember the held session id between runs.
    pub session_path: PathBuf,
    /// Bounded wait for `check_availability`.
    pub liveness_timeout: Duration,
}

impl ClientConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                        | Default                          |
    /// |---------------------------------|----------------------------------|
    /// | `API_URL`                       | `http://localhost:8000/api`      |
    /// | `SUPABASE_URL`                  | unset                            |
    /// | `SUPABASE_KEY`                  | unset                            |
    /// | `WAFILES_CREDENTIAL_PATH`       | `<data dir>/wafiles/credential`  |
    /// | `WAFILES_SESSION_PATH`          | `session` next to the credential |
    /// | `WAFILES_LIVENESS_TIMEOUT_SECS` | `5`                              |
    pub fn from_env() -> Self {
        let liveness_timeout = env::var("WAFILES_LIVENESS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LIVENESS_TIMEOUT);
        let credential_path = env::var("WAFILES_CREDENTIAL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_credential_path());

        Self {
            api_url: normalize_base_url(
                &env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            ),
            supabase_url: env::var("SUPABASE_URL").ok().filter(|v| !v.is_empty()),
            supabase_key: env::var("SUPABASE_KEY").ok().filter(|v| !v.is_empty()),
            session_path: env::var("WAFILES_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| sibling_session_path(&credential_path)),
            credential_path,
            liveness_timeout,
        }
    }

    /// Config pointing at `api_url` with every other field defaulted.
    pub fn with_api_url(api_url: &str) -> Self {
        let credential_path = default_credential_path();
        Self {
            api_url: normalize_base_url(api_url),
            supabase_url: None,
            supabase_key: None,
            session_path: sibling_session_path(&credential_path),
            credential_path,
            liveness_timeout: DEFAULT_LIVENESS_TIMEOUT,
        }
    }
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Path to the persisted credential file.
fn default_credential_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wafiles")
        .join("credential")
}

/// `session` in the same directory as `credential_path`.
pub fn sibling_session_path(credential_path: &Path) -> PathBuf {
    credential_path.with_file_name("session")
}
