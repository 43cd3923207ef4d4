//! Route audit subsystem.
//!
//! # Data Flow
//! ```text
//! Router::register(method, path, handler)
//!     → RouteTable (authoritative, consulted at dispatch)
//!     → RouteAudit::upsert (side channel, never read back)
//!         - NoopAudit: discard
//!         - JsonFileAudit: upsert keyed by (method, path), persisted as JSON
//! ```
//!
//! # Design Decisions
//! - The audit sink is purely observational; its failures are logged and
//!   never affect registration or dispatch
//! - Writes are synchronous and happen at registration time only

pub mod json_file;

use axum::http::Method;

use crate::error::AuditError;

pub use json_file::{AuditRecord, JsonFileAudit};

/// Receives one record per route registration.
pub trait RouteAudit: Send + Sync {
    /// Record that `(method, path)` is now served by `handler_name`.
    fn upsert(&self, method: &Method, path: &str, handler_name: &str) -> Result<(), AuditError>;
}

/// Audit sink that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAudit;

impl RouteAudit for NoopAudit {
    fn upsert(&self, _method: &Method, _path: &str, _handler_name: &str) -> Result<(), AuditError> {
        Ok(())
    }
}
