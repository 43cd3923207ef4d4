//! Per-request dispatch.
//!
//! # States
//! ```text
//! GlobalMiddleware → ExactMatch → PatternMatch → StaticFallback → NotFound
//!        │               │             │               │
//!        └───────────────┴─────────────┴───────────────┴──→ Fault (500)
//! ```
//!
//! # Design Decisions
//! - `handle` is total: every request gets a response, nothing propagates
//!   to the transport
//! - Handler/interceptor errors and panics are both faults; details are
//!   logged, the body is always the generic 500 text
//! - The route table is snapshotted once per request

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use tracing::Level;

use crate::error::HandlerError;
use crate::http::request::RequestContext;
use crate::http::response::Response;
use crate::middleware::{self, MiddlewareChain};
use crate::observability::metrics;
use crate::routing::{RouteEntry, Router};
use crate::static_files::StaticFiles;

/// Terminal state a request ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A global interceptor answered.
    Intercepted,
    /// A route matched by exact key or template; its local chain or handler answered.
    Routed { template: String, handler: String },
    /// Served (or refused) by the static file resolver.
    Static,
    NotFound,
    Fault,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Intercepted => "intercepted",
            Outcome::Routed { .. } => "routed",
            Outcome::Static => "static",
            Outcome::NotFound => "not_found",
            Outcome::Fault => "fault",
        }
    }
}

/// Single entry point from the transport layer.
#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
    global: MiddlewareChain,
    static_files: Option<StaticFiles>,
}

impl Dispatcher {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            global: MiddlewareChain::new(),
            static_files: None,
        }
    }

    /// Chain run before route lookup on every request.
    pub fn with_global_middleware(mut self, chain: MiddlewareChain) -> Self {
        self.global = chain;
        self
    }

    /// Enable the static file fallback.
    pub fn with_static_files(mut self, files: StaticFiles) -> Self {
        self.static_files = Some(files);
        self
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Dispatch one request. Never panics, never fails.
    pub fn handle(&self, ctx: RequestContext) -> Response {
        self.handle_with_outcome(ctx).0
    }

    /// Like `handle`, also reporting which terminal state was reached.
    pub fn handle_with_outcome(&self, mut ctx: RequestContext) -> (Response, Outcome) {
        let start = Instant::now();
        let method = ctx.method().clone();
        let path = ctx.path().to_string();

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(&mut ctx)));
        let (response, outcome) = match result {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                tracing::error!(method = %method, path = %path, error = %e, "Exception in route");
                (Response::internal_error(), Outcome::Fault)
            }
            Err(payload) => {
                tracing::error!(
                    method = %method,
                    path = %path,
                    panic = %panic_message(payload.as_ref()),
                    "Handler panicked"
                );
                (Response::internal_error(), Outcome::Fault)
            }
        };

        log_outcome(&method, &path, &response, &outcome);
        metrics::record_request(method.as_str(), response.status().as_u16(), outcome.as_str(), start);
        (response, outcome)
    }

    fn dispatch(&self, ctx: &mut RequestContext) -> Result<(Response, Outcome), HandlerError> {
        if let Some(response) = middleware::apply(&self.global, ctx)? {
            return Ok((response, Outcome::Intercepted));
        }

        let table = self.router.snapshot();
        let method = ctx.method().clone();

        if let Some(entry) = table.lookup_exact(&method, ctx.path()) {
            return run_route(entry, ctx);
        }

        let mut matched = None;
        for entry in table.iter_candidates(&method) {
            if let Some(params) = entry.pattern().matches(ctx.path()) {
                matched = Some((entry, params));
                break;
            }
        }
        if let Some((entry, params)) = matched {
            ctx.set_params(params);
            return run_route(entry, ctx);
        }

        if method == Method::GET {
            if let Some(files) = self.static_files.as_ref().filter(|f| f.handles(ctx.path())) {
                return Ok((files.resolve(ctx.path()), Outcome::Static));
            }
        }

        Ok((Response::not_found(), Outcome::NotFound))
    }
}

fn run_route(entry: &RouteEntry, ctx: &mut RequestContext) -> Result<(Response, Outcome), HandlerError> {
    let outcome = Outcome::Routed {
        template: entry.template().to_string(),
        handler: entry.handler().name().to_string(),
    };

    if let Some(response) = middleware::apply(entry.middleware(), ctx)? {
        return Ok((response, outcome));
    }
    let response = entry.handler().call(ctx)?;
    Ok((response, outcome))
}

fn log_outcome(method: &Method, path: &str, response: &Response, outcome: &Outcome) {
    let status = response.status().as_u16();
    let (template, handler) = match outcome {
        Outcome::Routed { template, handler } => (template.as_str(), handler.as_str()),
        _ => ("", ""),
    };

    let level = outcome_level(response.status(), outcome);
    if level == Level::ERROR {
        tracing::error!(method = %method, path = %path, status, outcome = outcome.as_str(), "Request failed");
    } else if level == Level::WARN {
        tracing::warn!(
            method = %method,
            path = %path,
            status,
            outcome = outcome.as_str(),
            route = template,
            "Request rejected"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status,
            outcome = outcome.as_str(),
            route = template,
            handler,
            "Request served"
        );
    }
}

/// Level a finished request is logged at. Blocked static access counts as an error.
fn outcome_level(status: StatusCode, outcome: &Outcome) -> Level {
    if status.is_server_error() || (status == StatusCode::FORBIDDEN && *outcome == Outcome::Static) {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
