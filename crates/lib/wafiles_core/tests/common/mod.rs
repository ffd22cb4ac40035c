//! Shared fixtures: an in-process fake backend and recording test doubles.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use wafiles_core::ClientResult;
use wafiles_core::config::ClientConfig;
use wafiles_core::credentials::{CredentialStore, MemoryCredentialStore};
use wafiles_core::transport::Navigator;
use wafiles_core::ApiClient;

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

pub type RequestLog = Arc<Mutex<Vec<Recorded>>>;

async fn record(State(log): State<RequestLog>, req: Request, next: Next) -> Response {
    let entry = Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        authorization: req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    log.lock().unwrap().push(entry);
    next.run(req).await
}

/// A running fake backend.
pub struct FakeBackend {
    pub base_url: String,
    pub log: RequestLog,
}

impl FakeBackend {
    /// Serve `routes` on an ephemeral loopback port, recording every request.
    pub async fn start(routes: Router) -> Self {
        let log: RequestLog = Arc::default();
        let app = routes.layer(middleware::from_fn_with_state(log.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            log,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

/// Navigator that records redirects and notices.
pub struct RecordingNavigator {
    location: Mutex<String>,
    redirects: AtomicUsize,
    notices: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Arc<Self> {
        Arc::new(Self {
            location: Mutex::new(location.to_string()),
            redirects: AtomicUsize::new(0),
            notices: Mutex::new(Vec::new()),
        })
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn location(&self) -> String {
        self.location.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> String {
        self.location()
    }

    fn redirect_to_sign_in(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
        *self.location.lock().unwrap() = "/login".to_string();
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Memory store that counts how often it was cleared.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryCredentialStore,
    clears: AtomicUsize,
}

impl CountingStore {
    pub fn with_credential(credential: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryCredentialStore::with_credential(credential),
            clears: AtomicUsize::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CredentialStore for CountingStore {
    fn get(&self) -> Option<String> {
        self.inner.get()
    }

    fn set(&self, credential: &str) -> ClientResult<()> {
        self.inner.set(credential)
    }

    fn clear(&self) -> ClientResult<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }
}

/// Client wired to `backend` with the given doubles.
pub fn client(
    backend: &FakeBackend,
    store: Arc<CountingStore>,
    navigator: Arc<RecordingNavigator>,
) -> ApiClient {
    init_tracing();
    let mut config = ClientConfig::with_api_url(&backend.base_url);
    config.liveness_timeout = std::time::Duration::from_millis(300);
    ApiClient::new(&config, store, navigator)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("wafiles_core=debug")
        .try_init();
}
