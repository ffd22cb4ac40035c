//! Authenticated HTTP transport.
//!
//! Every request leaves through [`AuthTransport`], which attaches the bearer
//! credential when one is stored. Every response comes back through it too:
//! a 401 invalidates the credential and sends the user back to sign-in.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::credentials::CredentialStore;
use crate::error::{ClientError, ClientResult};

/// Location of the sign-in view.
pub const SIGN_IN_LOCATION: &str = "/login";

/// Notice shown once when a 401 forces the user out.
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

/// The view layer as seen from the transport.
pub trait Navigator: Send + Sync {
    /// Where the user currently is (e.g. `/files`).
    fn current_location(&self) -> String;

    /// Move the user to the sign-in view.
    fn redirect_to_sign_in(&self);

    /// Surface a one-off message to the user.
    fn notify(&self, message: &str);
}

/// Request/response interception layer for the REST backend.
pub struct AuthTransport {
    base_url: String,
    client: Client,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_client(Client::new(), base_url, credentials, navigator)
    }

    /// Create a transport with a caller-supplied `reqwest` client.
    pub fn with_client(
        client: Client,
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: crate::config::normalize_base_url(base_url),
            client,
            credentials,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for `path` at the backend's origin, ignoring any path
    /// prefix of the base URL (`http://host:8000/api` → `http://host:8000/`).
    pub fn origin_url(&self, path: &str) -> String {
        match reqwest::Url::parse(&self.base_url) {
            Ok(mut url) => {
                url.set_path(path);
                url.set_query(None);
                url.set_fragment(None);
                url.to_string()
            }
            Err(_) => self.url(path),
        }
    }

    // -------------------------------------------------------------------------
    // Credential lifecycle
    // -------------------------------------------------------------------------

    /// Persist a freshly issued credential (sign-in).
    pub fn store_credential(&self, credential: &str) -> ClientResult<()> {
        self.credentials.set(credential)
    }

    /// Forget the credential (sign-out).
    pub fn clear_credential(&self) -> ClientResult<()> {
        self.credentials.clear()
    }

    pub fn has_credential(&self) -> bool {
        self.credentials.get().is_some()
    }

    // -------------------------------------------------------------------------
    // Typed request helpers
    // -------------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let resp = self.execute(self.request(Method::GET, path)).await?;
        decode(resp).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        decode(resp).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        decode(resp).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let resp = self.execute(self.request(Method::POST, path)).await?;
        decode(resp).await
    }

    pub async fn post_form<T, F>(&self, path: &str, form: &F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let resp = self
            .execute(self.request(Method::POST, path).form(form))
            .await?;
        decode(resp).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let resp = self.execute(self.request(Method::DELETE, path)).await?;
        decode(resp).await
    }

    /// GET the absolute `url` with a bounded wait, reporting only whether it
    /// answered 2xx.
    pub async fn is_reachable(&self, url: &str, timeout: Duration) -> bool {
        let request = self.request_url(Method::GET, url.to_string()).timeout(timeout);
        match self.execute(request).await {
            Ok(_) => true,
            Err(e) => {
                debug!(url, "liveness check failed: {e}");
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Interception
    // -------------------------------------------------------------------------

    /// Build a request, attaching the bearer credential when present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, self.url(path))
    }

    fn request_url(&self, method: Method, url: String) -> RequestBuilder {
        debug!(%method, %url, "backend request");
        let builder = self.client.request(method, url);
        match self.credentials.get() {
            Some(credential) => builder.bearer_auth(credential),
            None => builder,
        }
    }

    /// Send a request and classify its outcome.
    async fn execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_credential();
        }

        if !status.is_success() {
            let body = resp
                .text()
                .await
                .map_err(|e| ClientError::Network(format!("reading error body: {e}")))?;
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    /// Handle an authentication failure response.
    fn invalidate_credential(&self) {
        warn!("backend rejected credential; signing out");
        if let Err(e) = self.credentials.clear() {
            warn!("failed to clear credential: {e}");
        }
        if self.navigator.current_location() != SIGN_IN_LOCATION {
            self.navigator.redirect_to_sign_in();
            self.navigator.notify(SESSION_EXPIRED_NOTICE);
        }
    }
}

/// Decode a successful response body as JSON.
async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ClientError::Network(format!("reading response body: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Protocol(format!("unexpected response shape: {e}")))
}
