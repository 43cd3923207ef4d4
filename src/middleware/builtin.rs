//! Built-in interceptors.

use axum::http::{HeaderName, StatusCode};

use crate::error::HandlerError;
use crate::http::request::RequestContext;
use crate::http::response::Response;
use crate::middleware::pipeline::Middleware;

/// Logs every request it sees and lets it through.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLog;

impl Middleware for RequestLog {
    fn intercept(&self, ctx: &mut RequestContext) -> Result<Option<Response>, HandlerError> {
        tracing::debug!(
            method = %ctx.method(),
            path = %ctx.path(),
            query = ctx.query().unwrap_or(""),
            "Request received"
        );
        Ok(None)
    }
}

/// Rejects requests that lack a header with 401.
#[derive(Debug, Clone)]
pub struct RequireHeader {
    header: HeaderName,
}

impl RequireHeader {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl Middleware for RequireHeader {
    fn intercept(&self, ctx: &mut RequestContext) -> Result<Option<Response>, HandlerError> {
        if ctx.headers().contains_key(&self.header) {
            return Ok(None);
        }
        tracing::warn!(header = %self.header, path = %ctx.path(), "Required header missing");
        Ok(Some(
            Response::text(format!("Missing {} header", self.header)).with_status(StatusCode::UNAUTHORIZED),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Method};

    #[test]
    fn request_log_continues() {
        let mut ctx = RequestContext::new(Method::GET, "/x");
        assert!(RequestLog.intercept(&mut ctx).unwrap().is_none());
    }

    #[test]
    fn require_header_blocks_without_header() {
        let mw = RequireHeader::new(HeaderName::from_static("x-api-key"));

        let mut bare = RequestContext::new(Method::GET, "/x");
        let resp = mw.intercept(&mut bare).unwrap().unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.body_text(), "Missing x-api-key header");

        let mut ctx = RequestContext::new(Method::GET, "/x");
        ctx.headers_mut().insert("x-api-key", HeaderValue::from_static("k"));
        assert!(mw.intercept(&mut ctx).unwrap().is_none());
    }
}
