//! Bearer injection and 401 handling against a fake backend.

mod common;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use wafiles_core::ClientError;
use wafiles_core::transport::SESSION_EXPIRED_NOTICE;

use common::{CountingStore, FakeBackend, RecordingNavigator, client};

fn files_routes() -> Router {
    Router::new()
        .route("/files", get(|| async { Json(json!([])) }))
        .route(
            "/me",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Could not validate credentials"})),
                )
            }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
}

#[tokio::test]
async fn attaches_bearer_when_credential_present() {
    let backend = FakeBackend::start(files_routes()).await;
    let api = client(
        &backend,
        CountingStore::with_credential("tok-123"),
        RecordingNavigator::at("/files"),
    );

    api.files.list(None).await.expect("list");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn proceeds_unauthenticated_without_credential() {
    let backend = FakeBackend::start(files_routes()).await;
    let api = client(&backend, CountingStore::empty(), RecordingNavigator::at("/files"));

    api.files.list(None).await.expect("list");

    assert!(backend.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn unauthorized_clears_credential_and_redirects_once() {
    let backend = FakeBackend::start(files_routes()).await;
    let store = CountingStore::with_credential("stale");
    let navigator = RecordingNavigator::at("/files");
    let api = client(&backend, store.clone(), navigator.clone());

    let err = api.auth.me().await.unwrap_err();

    assert!(err.is_unauthorized(), "got {err:?}");
    assert_eq!(store.clears(), 1);
    assert!(!api.transport.has_credential());
    assert_eq!(navigator.redirects(), 1);
    assert_eq!(navigator.location(), "/login");
    assert_eq!(navigator.notices(), vec![SESSION_EXPIRED_NOTICE.to_string()]);
}

#[tokio::test]
async fn unauthorized_on_sign_in_view_does_not_redirect() {
    let backend = FakeBackend::start(files_routes()).await;
    let store = CountingStore::with_credential("stale");
    let navigator = RecordingNavigator::at("/login");
    let api = client(&backend, store.clone(), navigator.clone());

    let _ = api.auth.me().await.unwrap_err();

    assert_eq!(store.clears(), 1);
    assert_eq!(navigator.redirects(), 0);
    assert!(navigator.notices().is_empty());
}

#[tokio::test]
async fn server_errors_keep_credential_and_carry_body() {
    let backend = FakeBackend::start(files_routes()).await;
    let store = CountingStore::with_credential("tok");
    let navigator = RecordingNavigator::at("/files");
    let api = client(&backend, store.clone(), navigator.clone());

    let err = api
        .transport
        .get::<serde_json::Value>("/broken")
        .await
        .unwrap_err();

    match err {
        ClientError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert_eq!(store.clears(), 0);
    assert_eq!(navigator.redirects(), 0);
}

#[tokio::test]
async fn undecodable_success_body_is_a_protocol_error() {
    let routes = Router::new().route("/files", get(|| async { "not json" }));
    let backend = FakeBackend::start(routes).await;
    let api = client(&backend, CountingStore::empty(), RecordingNavigator::at("/files"));

    let err = api.files.list(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)), "got {err:?}");
}

#[tokio::test]
async fn truncated_error_body_is_a_network_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        // Promises 64 bytes, delivers 4, then hangs up.
        let _ = socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\n\r\nboom")
            .await;
        let _ = socket.shutdown().await;
    });

    let backend = FakeBackend {
        base_url: format!("http://{addr}"),
        log: Default::default(),
    };
    let store = CountingStore::with_credential("tok");
    let api = client(&backend, store.clone(), RecordingNavigator::at("/files"));

    let err = api
        .transport
        .get::<serde_json::Value>("/broken")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
    assert_eq!(store.clears(), 0);
}
