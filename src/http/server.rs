//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum router that feeds every request to the dispatcher
//! - Wire up middleware (tracing, timeout, request ID)
//! - Buffer request bodies up to the configured limit
//! - Bind server to listener with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ListenerConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::RequestContext;
use crate::http::response::Response;

/// Application state injected into the catch-all handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_bytes: usize,
}

/// HTTP transport in front of a `Dispatcher`.
pub struct HttpServer {
    router: Router,
    config: ListenerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ListenerConfig, dispatcher: Dispatcher) -> Self {
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
            max_body_bytes: config.max_body_bytes,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ListenerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered axum router, for embedding or in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_body_bytes = self.config.max_body_bytes,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the listener config.
    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }
}

/// Catch-all handler: buffer the request, dispatch it off the async workers.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> axum::response::Response {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(method = %parts.method, path = %parts.uri.path(), error = %e, "Request body rejected");
            return Response::text("413: Payload Too Large")
                .with_status(StatusCode::PAYLOAD_TOO_LARGE)
                .into_response();
        }
    };

    let ctx = RequestContext::new(parts.method, parts.uri.path())
        .with_query(parts.uri.query().map(str::to_string))
        .with_headers(parts.headers)
        .with_body(body);

    let dispatcher = Arc::clone(&state.dispatcher);
    match tokio::task::spawn_blocking(move || dispatcher.handle(ctx)).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Dispatch task failed");
            Response::internal_error().into_response()
        }
    }
}
