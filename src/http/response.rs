//! Response construction and conversion.
//!
//! # Responsibilities
//! - Build plain-text, JSON and raw byte responses
//! - Keep headers in the order they were added
//! - Provide the canonical bodies for 403/404/500
//! - Convert into an axum response for the transport layer
//!
//! # Design Decisions
//! - Bodies are fully buffered; there is no streaming at this layer
//! - Error bodies are fixed strings so no internal detail can leak

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::HandlerError;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Status, ordered header list and byte body.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
}

impl Response {
    /// Create a response with the given content type and body.
    pub fn bytes(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: vec![(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
            body: body.into(),
        }
    }

    /// 200 plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes(StatusCode::OK, TEXT_PLAIN, body.into())
    }

    /// 200 HTML response.
    pub fn html(body: impl Into<String>) -> Self {
        Self::bytes(StatusCode::OK, TEXT_HTML, body.into())
    }

    /// 200 response whose body is the compact JSON encoding of `value`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, HandlerError> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::bytes(StatusCode::OK, APPLICATION_JSON, body))
    }

    pub fn not_found() -> Self {
        Self::text("404: Not Found").with_status(StatusCode::NOT_FOUND)
    }

    pub fn forbidden() -> Self {
        Self::text("403: Forbidden").with_status(StatusCode::FORBIDDEN)
    }

    pub fn internal_error() -> Self {
        Self::text("500: Internal Server Error").with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Append a header. Existing headers with the same name are kept.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// First `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name == header::CONTENT_TYPE)
            .and_then(|(_, value)| value.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text, lossy.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_is_exact_encoding() {
        let resp = Response::json(&json!({"a": 1})).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.body().as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn canonical_error_bodies() {
        assert_eq!(Response::not_found().body_text(), "404: Not Found");
        assert_eq!(Response::forbidden().status(), StatusCode::FORBIDDEN);
        assert_eq!(Response::internal_error().body_text(), "500: Internal Server Error");
    }

    #[test]
    fn headers_keep_insertion_order() {
        let resp = Response::text("ok")
            .with_header(HeaderName::from_static("x-b"), HeaderValue::from_static("2"))
            .with_header(HeaderName::from_static("x-a"), HeaderValue::from_static("1"));
        let names: Vec<&str> = resp.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["content-type", "x-b", "x-a"]);
    }

    #[test]
    fn converts_into_axum_response() {
        let resp = Response::text("teapot").with_status(StatusCode::IM_A_TEAPOT).into_response();
        assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
    }
}
