//! Error types shared across the dispatcher.
//!
//! # Design Decisions
//! - `HandlerError` is the only error a handler or interceptor can surface;
//!   the dispatcher turns every one of them into a generic 500
//! - `NoMatch` and `Forbidden` never exist as errors: they are answered
//!   with a response where they are detected
//! - Audit failures are observational and never abort registration

use thiserror::Error;

/// Errors raised by handlers and interceptors.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A value could not be serialised to JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A template was missing or failed to render.
    #[error("Template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    /// An I/O operation inside a handler failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Free-form failure reported by application code.
    #[error("{0}")]
    Message(String),
}

impl HandlerError {
    /// Build a free-form handler error.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Errors raised by a route audit sink.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audit store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
