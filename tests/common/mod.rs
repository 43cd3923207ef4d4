//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use switchyard::config::ListenerConfig;
use switchyard::http::HttpServer;
use switchyard::lifecycle::Shutdown;
use switchyard::static_files::StaticFiles;
use switchyard::{Dispatcher, RequestContext, Response, Router};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Temp directory holding `static/` with a stylesheet and a `secret.txt`
/// one level above it.
pub fn static_fixture() -> (TempDir, StaticFiles) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("static");
    fs::create_dir_all(root.join("css")).unwrap();
    fs::write(root.join("css").join("site.css"), "body { margin: 0; }").unwrap();
    fs::write(root.join("hello.txt"), "hello from disk").unwrap();
    fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
    let files = StaticFiles::new(root, "/static/");
    (dir, files)
}

/// Dispatcher over `router` with the static fixture mounted at `/static/`.
pub fn dispatcher_with_static(router: Arc<Router>) -> (TempDir, Dispatcher) {
    let (dir, files) = static_fixture();
    (dir, Dispatcher::new(router).with_static_files(files))
}

pub fn get(path: &str) -> RequestContext {
    RequestContext::new(Method::GET, path)
}

pub fn text(body: &'static str) -> impl Fn(&mut RequestContext) -> Result<Response, switchyard::HandlerError> {
    move |_| Ok(Response::text(body))
}

/// Serve `dispatcher` on an ephemeral port until the returned `Shutdown` fires.
pub async fn spawn_server(dispatcher: Dispatcher) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ListenerConfig {
        bind_address: addr.to_string(),
        max_body_bytes: 1024,
        ..ListenerConfig::default()
    };
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config, dispatcher);
    let handle = tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });
    (addr, shutdown, handle)
}
