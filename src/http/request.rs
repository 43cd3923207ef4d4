//! Request context handed to interceptors and handlers.
//!
//! # Responsibilities
//! - Carry method, path, query, headers and the buffered body
//! - Hold the route parameters captured by a pattern match
//! - Offer a typed extension slot so interceptors can hand data to handlers
//!
//! # Design Decisions
//! - The context lives for exactly one dispatch; nothing in it is shared
//! - Route parameters are raw path segments (no decoding, no coercion)

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{Extensions, HeaderMap, Method};

/// Named values captured from a parameterized path template.
///
/// Inserting a name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a captured value by placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-request state produced by the transport layer.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
    params: RouteParams,
    extensions: Extensions,
}

impl RequestContext {
    /// Create a context with no headers and an empty body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method,
            path: if path.is_empty() { "/".to_string() } else { path },
            query: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            params: RouteParams::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parameters bound by the matched route template (empty for exact matches).
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Shorthand for `params().get(name)`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn set_params(&mut self, params: RouteParams) {
        self.params = params;
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_root() {
        let ctx = RequestContext::new(Method::GET, "");
        assert_eq!(ctx.path(), "/");
    }

    #[test]
    fn duplicate_param_keeps_last_value() {
        let mut params = RouteParams::new();
        params.insert("id", "1");
        params.insert("id", "2");
        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.len(), 1);
    }
}
