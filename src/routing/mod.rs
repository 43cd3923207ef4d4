//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup, or late while serving):
//!     router.rs (get/post/put/delete, resource, register)
//!     → table.rs (insert or replace by (method, template))
//!     → pattern.rs (compile template into segments)
//!     → swap in the new table
//!
//! Lookup (per request, via dispatcher):
//!     table.rs lookup_exact(method, path)
//!     → else table.rs iter_candidates(method) in registration order
//!     → pattern.rs matches(path) → RouteParams
//! ```
//!
//! # Design Decisions
//! - Exact key lookup first, then first structural pattern match wins
//! - No specificity scoring: registration order alone decides precedence
//! - Placeholders match exactly one non-empty segment

pub mod handler;
pub mod pattern;
pub mod resource;
pub mod router;
pub mod table;

pub use handler::Handler;
pub use pattern::{PathPattern, Segment};
pub use resource::{Resource, Verb};
pub use router::{RouteBuilder, Router};
pub use table::{RouteChange, RouteEntry, RouteKey, RouteTable};
