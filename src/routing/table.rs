//! Route storage keyed by (method, path template).
//!
//! # Responsibilities
//! - Store one entry per (method, template) key
//! - Replace an entry in place when its key is registered again
//! - Exact lookup by key
//! - Ordered candidate iteration for pattern fallback
//!
//! # Design Decisions
//! - Entries are kept in a `Vec` in first-registration order; a `HashMap`
//!   indexes keys into it, so replacing keeps the original position
//! - No removal: routes live as long as the table
//! - Cloning is cheap (handlers and interceptors are `Arc`s), which makes
//!   copy-on-write swaps in `Router` affordable

use std::collections::HashMap;

use axum::http::Method;

use crate::middleware::MiddlewareChain;
use crate::routing::handler::Handler;
use crate::routing::pattern::PathPattern;

/// Unique registration key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// A registered handler with its local interceptor chain.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    key: RouteKey,
    pattern: PathPattern,
    handler: Handler,
    middleware: MiddlewareChain,
}

impl RouteEntry {
    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn template(&self) -> &str {
        &self.key.path
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn middleware(&self) -> &MiddlewareChain {
        &self.middleware
    }
}

/// Whether a registration created a new entry or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChange {
    Inserted,
    Updated,
}

impl RouteChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteChange::Inserted => "inserted",
            RouteChange::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    index: HashMap<RouteKey, usize>,
}

impl RouteTable {
    /// Create an empty table. `Router` installs the default root handler on top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `(method, path)`.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
        middleware: MiddlewareChain,
    ) -> RouteChange {
        let key = RouteKey::new(method, path);

        if let Some(&slot) = self.index.get(&key) {
            let entry = &mut self.entries[slot];
            entry.handler = handler;
            entry.middleware = middleware;
            return RouteChange::Updated;
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(RouteEntry {
            pattern: PathPattern::compile(path),
            key,
            handler,
            middleware,
        });
        RouteChange::Inserted
    }

    /// Entry registered under exactly this method and path string.
    pub fn lookup_exact(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        // HashMap<RouteKey, _> can't be probed with borrowed parts, so build the key.
        let key = RouteKey::new(method.clone(), path);
        self.index.get(&key).map(|&slot| &self.entries[slot])
    }

    /// Entries for `method` in first-registration order.
    pub fn iter_candidates<'a>(&'a self, method: &'a Method) -> impl Iterator<Item = &'a RouteEntry> + 'a {
        self.entries.iter().filter(move |e| &e.key.method == method)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::Response;

    fn handler(name: &'static str) -> Handler {
        Handler::new(name, move |_| Ok(Response::text(name)))
    }

    #[test]
    fn reregistering_replaces_in_place() {
        let mut table = RouteTable::new();
        assert_eq!(
            table.register(Method::GET, "/a", handler("first"), MiddlewareChain::new()),
            RouteChange::Inserted
        );
        table.register(Method::GET, "/b", handler("b"), MiddlewareChain::new());
        assert_eq!(
            table.register(Method::GET, "/a", handler("second"), MiddlewareChain::new()),
            RouteChange::Updated
        );

        assert_eq!(table.len(), 2);
        let entry = table.lookup_exact(&Method::GET, "/a").unwrap();
        assert_eq!(entry.handler().name(), "second");

        // The replaced entry keeps its original position.
        let order: Vec<&str> = table.iter().map(|e| e.template()).collect();
        assert_eq!(order, vec!["/a", "/b"]);
    }

    #[test]
    fn lookup_is_per_method() {
        let mut table = RouteTable::new();
        table.register(Method::POST, "/hello", handler("post"), MiddlewareChain::new());
        assert!(table.lookup_exact(&Method::GET, "/hello").is_none());
        assert!(table.lookup_exact(&Method::POST, "/hello").is_some());
    }

    #[test]
    fn candidates_follow_registration_order() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/x/{a}", handler("one"), MiddlewareChain::new());
        table.register(Method::POST, "/x/{a}", handler("post"), MiddlewareChain::new());
        table.register(Method::GET, "/{b}/y", handler("two"), MiddlewareChain::new());

        let names: Vec<&str> = table
            .iter_candidates(&Method::GET)
            .map(|e| e.handler().name())
            .collect();
        assert_eq!(names, vec!["one", "two"]);
    }
}
