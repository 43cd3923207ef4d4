//! Ordered interceptor chains.
//!
//! # Responsibilities
//! - Run interceptors in registration order against a mutable request context
//! - Stop at the first interceptor that produces a response
//! - Skip registrations that cannot be invoked
//!
//! # Design Decisions
//! - `Ok(None)` from an interceptor means "continue"
//! - `Err` aborts the chain and surfaces as a fault to the dispatcher
//! - Unresolved interceptors are a tolerated misconfiguration, not an error

use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::http::request::RequestContext;
use crate::http::response::Response;

/// Something that inspects a request before its handler runs.
pub trait Middleware: Send + Sync {
    /// Return `Ok(Some(response))` to answer the request and end the chain.
    fn intercept(&self, ctx: &mut RequestContext) -> Result<Option<Response>, HandlerError>;
}

impl<F> Middleware for F
where
    F: Fn(&mut RequestContext) -> Result<Option<Response>, HandlerError> + Send + Sync,
{
    fn intercept(&self, ctx: &mut RequestContext) -> Result<Option<Response>, HandlerError> {
        self(ctx)
    }
}

/// A chain entry.
#[derive(Clone)]
pub enum Interceptor {
    /// Invocable middleware.
    Callable(Arc<dyn Middleware>),
    /// A registration that names nothing invocable. Skipped at dispatch time.
    Unresolved(String),
}

impl Interceptor {
    pub fn new(middleware: impl Middleware + 'static) -> Self {
        Self::Callable(Arc::new(middleware))
    }

    /// The invocable middleware, if this entry has one.
    pub fn callable(&self) -> Option<&dyn Middleware> {
        match self {
            Self::Callable(m) => Some(m.as_ref()),
            Self::Unresolved(_) => None,
        }
    }
}

/// Wrap a closure as an interceptor.
pub fn from_fn<F>(f: F) -> Interceptor
where
    F: Fn(&mut RequestContext) -> Result<Option<Response>, HandlerError> + Send + Sync + 'static,
{
    Interceptor::Callable(Arc::new(f))
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Unresolved(name) => f.debug_tuple("Unresolved").field(name).finish(),
        }
    }
}

/// Ordered sequence of interceptors.
#[derive(Clone, Debug, Default)]
pub struct MiddlewareChain {
    interceptors: Vec<Interceptor>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor at the end of the chain.
    pub fn push(&mut self, interceptor: Interceptor) {
        self.interceptors.push(interceptor);
    }

    /// Builder-style `push`.
    pub fn with(mut self, interceptor: Interceptor) -> Self {
        self.push(interceptor);
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interceptor> {
        self.interceptors.iter()
    }
}

impl FromIterator<Interceptor> for MiddlewareChain {
    fn from_iter<I: IntoIterator<Item = Interceptor>>(iter: I) -> Self {
        Self {
            interceptors: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Interceptor>> for MiddlewareChain {
    fn from(interceptors: Vec<Interceptor>) -> Self {
        Self { interceptors }
    }
}

/// Run `chain` against `ctx`.
///
/// Returns the first response produced by an interceptor, or `None` when
/// every interceptor let the request through.
pub fn apply(chain: &MiddlewareChain, ctx: &mut RequestContext) -> Result<Option<Response>, HandlerError> {
    for (position, interceptor) in chain.iter().enumerate() {
        let Some(middleware) = interceptor.callable() else {
            tracing::debug!(position, interceptor = ?interceptor, "Skipping non-invocable interceptor");
            continue;
        };

        if let Some(response) = middleware.intercept(ctx)? {
            tracing::debug!(
                position,
                status = response.status().as_u16(),
                "Interceptor short-circuited request"
            );
            return Ok(Some(response));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ctx() -> RequestContext {
        RequestContext::new(Method::GET, "/")
    }

    #[test]
    fn empty_chain_continues() {
        assert!(apply(&MiddlewareChain::new(), &mut ctx()).unwrap().is_none());
    }

    #[test]
    fn first_response_stops_chain() {
        let later = Arc::new(AtomicUsize::new(0));
        let seen = later.clone();
        let chain = MiddlewareChain::new()
            .with(from_fn(|_| Ok(None)))
            .with(from_fn(|_| {
                Ok(Some(Response::text("blocked").with_status(StatusCode::FORBIDDEN)))
            }))
            .with(from_fn(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }));

        let resp = apply(&chain, &mut ctx()).unwrap().unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn runs_in_registration_order() {
        let chain = MiddlewareChain::new()
            .with(from_fn(|ctx| {
                ctx.extensions_mut().insert(vec!["first"]);
                Ok(None)
            }))
            .with(from_fn(|ctx| {
                if let Some(order) = ctx.extensions_mut().get_mut::<Vec<&'static str>>() {
                    order.push("second");
                }
                Ok(None)
            }));

        let mut ctx = ctx();
        apply(&chain, &mut ctx).unwrap();
        assert_eq!(ctx.extensions().get::<Vec<&'static str>>(), Some(&vec!["first", "second"]));
    }

    #[test]
    fn unresolved_interceptor_is_skipped() {
        let mut chain = MiddlewareChain::new();
        chain.push(Interceptor::Unresolved("missing".into()));
        chain.push(from_fn(|_| Ok(Some(Response::text("reached")))));

        let resp = apply(&chain, &mut ctx()).unwrap().unwrap();
        assert_eq!(resp.body_text(), "reached");
    }

    #[test]
    fn interceptor_error_propagates() {
        let chain = MiddlewareChain::new().with(from_fn(|_| Err(HandlerError::msg("boom"))));
        assert!(apply(&chain, &mut ctx()).is_err());
    }
}
