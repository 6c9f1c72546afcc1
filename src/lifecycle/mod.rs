//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Start tracer → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     SIGINT → stop accepting → drain connections → stop tracer
//! ```
//!
//! # Design Decisions
//! - The tracer stops last so the final flush covers drained requests
//! - Stop is best-effort: spans still open after the final flush are
//!   discarded, never crashed on

pub mod shutdown;

pub use shutdown::Shutdown;
