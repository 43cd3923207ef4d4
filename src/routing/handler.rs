//! Named request handlers.

use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::http::request::RequestContext;
use crate::http::response::Response;

type HandlerFn = dyn Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync;

/// A callable with a fixed request → response contract and a name.
///
/// The name identifies the handler in logs and in the route audit sink,
/// and supplies the path when a route is registered without one.
#[derive(Clone)]
pub struct Handler {
    name: Arc<str>,
    func: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut RequestContext) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, ctx: &mut RequestContext) -> Result<Response, HandlerError> {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("name", &self.name).finish_non_exhaustive()
    }
}
