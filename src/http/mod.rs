//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, timeout, body buffering)
//!     → request.rs (RequestContext: method, path, headers, body, params)
//!     → [dispatcher decides the response]
//!     → response.rs (status, ordered headers, body → axum response)
//!     → Send to client
//! ```
//!
//! templates.rs is a helper handlers call into; the dispatcher never does.

pub mod request;
pub mod response;
pub mod server;
pub mod templates;

pub use request::{RequestContext, RouteParams};
pub use response::Response;
pub use server::HttpServer;
pub use templates::Templates;
