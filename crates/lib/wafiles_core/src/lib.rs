//! # wafiles_core
//!
//! Authenticated client and state store for the WhatsApp file backend.
//!
//! All clients share one [`transport::AuthTransport`], which owns the bearer
//! credential. [`ApiClient`] wires them together from a [`config::ClientConfig`].

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod files;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod transport;

use std::sync::Arc;

use config::ClientConfig;
use credentials::CredentialStore;
use transport::{AuthTransport, Navigator};

pub use error::{ClientError, ClientResult};

/// Every backend client, sharing one transport.
pub struct ApiClient {
    pub transport: Arc<AuthTransport>,
    pub auth: auth::AuthClient,
    pub sessions: session::SessionClient,
    pub files: Arc<files::FileClient>,
    pub storage: storage::StorageClient,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let transport = Arc::new(AuthTransport::new(
            &config.api_url,
            credentials,
            navigator,
        ));
        Self {
            auth: auth::AuthClient::new(Arc::clone(&transport)),
            sessions: session::SessionClient::with_liveness_timeout(
                Arc::clone(&transport),
                config.liveness_timeout,
            ),
            files: Arc::new(files::FileClient::new(Arc::clone(&transport))),
            storage: storage::StorageClient::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// A fresh files store backed by this client's file resource.
    pub fn files_store(&self) -> store::FilesStore {
        store::FilesStore::new(Arc::clone(&self.files))
    }
}

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
