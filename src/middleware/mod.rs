//! Middleware subsystem.
//!
//! # Data Flow
//! ```text
//! config [middleware] global = ["request_log", "require_header:x-api-key"]
//!     → registry.rs (resolve names → Interceptor, unknown → Unresolved)
//!     → MiddlewareChain (global)
//!
//! Per request (dispatcher):
//!     pipeline.rs apply(global chain)
//!     → route matched → pipeline.rs apply(local chain)
//!     → first Some(response) short-circuits; handler never runs
//! ```
//!
//! # Design Decisions
//! - Global chain always runs before the route's local chain
//! - Order is exactly registration order
//! - Non-invocable entries are skipped rather than failing the request

pub mod builtin;
pub mod pipeline;
pub mod registry;

pub use pipeline::{apply, from_fn, Interceptor, Middleware, MiddlewareChain};
pub use registry::MiddlewareRegistry;
