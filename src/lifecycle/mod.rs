//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → audit sink → Router → register routes
//!     → resolve global chain → Dispatcher → start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, routes before listeners
//! - Listeners start last (traffic only when the table is populated)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
