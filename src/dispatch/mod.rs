//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! transport (http/server.rs)
//!     → dispatcher.rs handle(RequestContext)
//!         → middleware: global chain
//!         → routing: exact lookup, then pattern candidates
//!         → middleware: local chain → handler
//!         → static_files: GET under prefix
//!         → 404 / 500
//!     → Response back to transport
//! ```
//!
//! # Design Decisions
//! - No cross-request state besides the route table snapshot
//! - One outer fault boundary; inner layers just return errors

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Outcome};
