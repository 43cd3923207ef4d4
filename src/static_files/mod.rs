//! Static file subsystem.
//!
//! # Data Flow
//! ```text
//! GET /static/<relative>   (only after exact and pattern matching failed)
//!     → resolver.rs strip prefix
//!     → traversal check (403, before any filesystem access)
//!     → metadata + read under root (404 / 500)
//!     → mime.rs content type by extension
//!     → 200 with raw bytes
//! ```
//!
//! # Design Decisions
//! - Traversal protection is a security boundary evaluated on the raw path
//! - Directories are never listed; they resolve to 404
//! - I/O failures become 500 responses here, never faults

pub mod mime;
pub mod resolver;

pub use mime::content_type_for;
pub use resolver::StaticFiles;
