//! Multi-verb resources.
//!
//! A `Resource` is a named set of optional verb handlers. Registering it at a
//! path creates one route per present verb, all sharing one interceptor chain.

use axum::http::Method;

use crate::error::HandlerError;
use crate::http::request::RequestContext;
use crate::http::response::Response;
use crate::routing::handler::Handler;

/// Verbs a resource can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    /// Lowercase name used in handler identifiers (`Resource.get`).
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
        }
    }
}

/// Named capability set of verb handlers.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    get: Option<Handler>,
    post: Option<Handler>,
    put: Option<Handler>,
    delete: Option<Handler>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            get: None,
            post: None,
            put: None,
            delete: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach the handler for `verb`, replacing any previous one.
    pub fn on<F>(mut self, verb: Verb, func: F) -> Self
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        let handler = Handler::new(format!("{}.{}", self.name, verb.as_str()), func);
        *self.slot_mut(verb) = Some(handler);
        self
    }

    pub fn get<F>(self, func: F) -> Self
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        self.on(Verb::Get, func)
    }

    pub fn post<F>(self, func: F) -> Self
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        self.on(Verb::Post, func)
    }

    pub fn put<F>(self, func: F) -> Self
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        self.on(Verb::Put, func)
    }

    pub fn delete<F>(self, func: F) -> Self
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        self.on(Verb::Delete, func)
    }

    pub fn handler(&self, verb: Verb) -> Option<&Handler> {
        match verb {
            Verb::Get => self.get.as_ref(),
            Verb::Post => self.post.as_ref(),
            Verb::Put => self.put.as_ref(),
            Verb::Delete => self.delete.as_ref(),
        }
    }

    /// Present verbs with their handlers, in GET, POST, PUT, DELETE order.
    pub fn handlers(&self) -> impl Iterator<Item = (Verb, &Handler)> {
        Verb::ALL
            .into_iter()
            .filter_map(move |verb| self.handler(verb).map(|h| (verb, h)))
    }

    fn slot_mut(&mut self, verb: Verb) -> &mut Option<Handler> {
        match verb {
            Verb::Get => &mut self.get,
            Verb::Post => &mut self.post,
            Verb::Put => &mut self.put,
            Verb::Delete => &mut self.delete,
        }
    }
}
