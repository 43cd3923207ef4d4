//! Route registration API.
//!
//! # Responsibilities
//! - Per-verb and resource registration on top of `RouteTable`
//! - Install the default root handler at construction
//! - Publish every registration to the route audit sink
//! - Hand out immutable table snapshots to the dispatcher
//!
//! # Design Decisions
//! - The table sits behind `ArcSwap`: registration clones the current table,
//!   applies the change and swaps it in, so readers never take a lock and
//!   late registration is safe while serving
//! - Registering an existing (method, path) replaces its handler and chain
//! - Audit failures are logged and otherwise ignored

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::http::Method;

use crate::audit::{NoopAudit, RouteAudit};
use crate::error::HandlerError;
use crate::http::request::RequestContext;
use crate::http::response::Response;
use crate::middleware::{Interceptor, MiddlewareChain};
use crate::observability::metrics;
use crate::routing::handler::Handler;
use crate::routing::resource::Resource;
use crate::routing::table::{RouteChange, RouteTable};

pub const DEFAULT_ROOT_HANDLER: &str = "default_root";
pub const DEFAULT_ROOT_BODY: &str = "switchyard is running";

/// Shared, swappable route table plus its audit sink.
pub struct Router {
    table: ArcSwap<RouteTable>,
    audit: Arc<dyn RouteAudit>,
}

impl Router {
    /// Router with no audit sink.
    pub fn new() -> Self {
        Self::with_audit(Arc::new(NoopAudit))
    }

    /// Router that reports every registration to `audit`.
    pub fn with_audit(audit: Arc<dyn RouteAudit>) -> Self {
        let router = Self {
            table: ArcSwap::from_pointee(RouteTable::new()),
            audit,
        };
        router.register(Method::GET, "/", default_root_handler(), MiddlewareChain::new());
        router
    }

    /// Register `handler` for `(method, path)` with a local interceptor chain.
    pub fn register(
        &self,
        method: Method,
        path: &str,
        handler: Handler,
        middleware: MiddlewareChain,
    ) -> RouteChange {
        let path = if path.is_empty() { "/" } else { path };

        let mut change = RouteChange::Inserted;
        self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            change = next.register(method.clone(), path, handler.clone(), middleware.clone());
            next
        });

        match change {
            RouteChange::Inserted => tracing::info!(
                method = %method,
                path = %path,
                handler = %handler.name(),
                "New route registered"
            ),
            RouteChange::Updated => tracing::info!(
                method = %method,
                path = %path,
                handler = %handler.name(),
                "Route updated"
            ),
        }
        metrics::record_route_registered(change);

        if let Err(e) = self.audit.upsert(&method, path, handler.name()) {
            tracing::warn!(method = %method, path = %path, error = %e, "Failed to record route in audit sink");
        }
        change
    }

    pub fn get(&self, path: &str) -> RouteBuilder<'_> {
        RouteBuilder::new(self, Method::GET, Some(path))
    }

    pub fn post(&self, path: &str) -> RouteBuilder<'_> {
        RouteBuilder::new(self, Method::POST, Some(path))
    }

    pub fn put(&self, path: &str) -> RouteBuilder<'_> {
        RouteBuilder::new(self, Method::PUT, Some(path))
    }

    pub fn delete(&self, path: &str) -> RouteBuilder<'_> {
        RouteBuilder::new(self, Method::DELETE, Some(path))
    }

    /// Builder whose path defaults to `/<handler name>`.
    pub fn route(&self, method: Method) -> RouteBuilder<'_> {
        RouteBuilder::new(self, method, None)
    }

    /// Register one route per verb present on `resource`, all sharing `middleware`.
    pub fn resource(&self, path: &str, resource: &Resource, middleware: MiddlewareChain) -> usize {
        let mut count = 0;
        for (verb, handler) in resource.handlers() {
            self.register(verb.method(), path, handler.clone(), middleware.clone());
            count += 1;
        }
        tracing::debug!(resource = %resource.name(), path = %path, routes = count, "Resource registered");
        count
    }

    /// Current table. Later registrations do not affect a snapshot already taken.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration in progress for one method.
pub struct RouteBuilder<'r> {
    router: &'r Router,
    method: Method,
    path: Option<String>,
    middleware: MiddlewareChain,
}

impl<'r> RouteBuilder<'r> {
    fn new(router: &'r Router, method: Method, path: Option<&str>) -> Self {
        Self {
            router,
            method,
            path: path.map(str::to_string),
            middleware: MiddlewareChain::new(),
        }
    }

    /// Append a local interceptor.
    pub fn middleware(mut self, interceptor: Interceptor) -> Self {
        self.middleware.push(interceptor);
        self
    }

    /// Append every interceptor of `chain`.
    pub fn layer(mut self, chain: &MiddlewareChain) -> Self {
        for interceptor in chain.iter() {
            self.middleware.push(interceptor.clone());
        }
        self
    }

    /// Register a named closure.
    pub fn to<F>(self, name: &str, func: F) -> RouteChange
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        self.handler(Handler::new(name, func))
    }

    pub fn handler(self, handler: Handler) -> RouteChange {
        let path = self
            .path
            .unwrap_or_else(|| format!("/{}", handler.name()));
        self.router
            .register(self.method, &path, handler, self.middleware)
    }
}

fn default_root_handler() -> Handler {
    Handler::new(DEFAULT_ROOT_HANDLER, |_| Ok(Response::text(DEFAULT_ROOT_BODY)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::JsonFileAudit;
    use crate::routing::resource::Resource;

    #[test]
    fn default_root_is_installed_and_replaceable() {
        let router = Router::new();
        let table = router.snapshot();
        let root = table.lookup_exact(&Method::GET, "/").unwrap();
        assert_eq!(root.handler().name(), DEFAULT_ROOT_HANDLER);

        let change = router.get("/").to("index", |_| Ok(Response::text("custom")));
        assert_eq!(change, RouteChange::Updated);
        let table = router.snapshot();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup_exact(&Method::GET, "/").unwrap().handler().name(), "index");
    }

    #[test]
    fn path_defaults_to_handler_name() {
        let router = Router::new();
        router.route(Method::GET).to("bruh", |_| Ok(Response::text("bruh")));
        assert!(router.snapshot().lookup_exact(&Method::GET, "/bruh").is_some());
    }

    #[test]
    fn snapshots_are_isolated_from_later_registration() {
        let router = Router::new();
        let before = router.snapshot();
        router.post("/late").to("late", |_| Ok(Response::text("late")));
        assert!(before.lookup_exact(&Method::POST, "/late").is_none());
        assert!(router.snapshot().lookup_exact(&Method::POST, "/late").is_some());
    }

    #[test]
    fn resource_registers_present_verbs_with_shared_chain() {
        let router = Router::new();
        let resource = Resource::new("ExampleView")
            .get(|_| Ok(Response::text("get")))
            .put(|_| Ok(Response::text("put")));
        let chain = MiddlewareChain::new().with(crate::middleware::from_fn(|_| Ok(None)));

        assert_eq!(router.resource("/example", &resource, chain), 2);

        let table = router.snapshot();
        let get = table.lookup_exact(&Method::GET, "/example").unwrap();
        assert_eq!(get.handler().name(), "ExampleView.get");
        assert_eq!(get.middleware().len(), 1);
        assert!(table.lookup_exact(&Method::PUT, "/example").is_some());
        assert!(table.lookup_exact(&Method::POST, "/example").is_none());
    }

    #[test]
    fn registrations_reach_audit_sink() {
        let dir = tempfile::tempdir().unwrap();
        let audit = Arc::new(JsonFileAudit::open(dir.path().join("routes.json")).unwrap());
        let router = Router::with_audit(audit.clone());

        router.get("/hello").to("hello_get", |_| Ok(Response::text("hi")));
        router.get("/hello").to("hello_again", |_| Ok(Response::text("hi")));

        assert_eq!(audit.get("GET", "/").as_deref(), Some(DEFAULT_ROOT_HANDLER));
        assert_eq!(audit.get("GET", "/hello").as_deref(), Some("hello_again"));
        assert_eq!(audit.len(), 2);
    }
}
