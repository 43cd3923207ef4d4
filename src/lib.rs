//! Switchyard: a small HTTP request dispatcher.
//!
//! Maps (method, path) to registered handlers, with literal and
//! parameterized templates (`/users/{user_id}/posts/{post_id}`), ordered
//! global and per-route interceptor chains, and a static file fallback
//! with traversal protection.

// Core subsystems
pub mod dispatch;
pub mod http;
pub mod middleware;
pub mod routing;
pub mod static_files;

// Collaborators
pub mod audit;
pub mod demo;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use dispatch::Dispatcher;
pub use error::HandlerError;
pub use http::{HttpServer, RequestContext, Response};
pub use lifecycle::Shutdown;
pub use routing::{Handler, Resource, Router};
