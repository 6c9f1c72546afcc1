//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → trace spans (crate::trace, exported per batch)
//! ```
//!
//! # Design Decisions
//! - Process logs and trace spans are separate channels: logs go to the
//!   subscriber immediately, spans are buffered and flushed in batches
//! - Log filtering is environment-driven (`RUST_LOG`)

pub mod logging;
