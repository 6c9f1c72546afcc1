//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, timeout, access log, request ID)
//!     → routing::Mux (pattern lookup)
//!     → traced.rs (open span, run inner handler, close span)
//!     → handler.rs (application handler)
//!     → response back to client
//! ```

pub mod handler;
pub mod server;
pub mod traced;

pub use handler::{DelayedOk, Handler, HandlerError, HandlerResult};
pub use server::HttpServer;
pub use traced::{TracedHandler, TracedMuxBuilder};
