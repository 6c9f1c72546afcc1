//! Tracing subsystem: span lifecycle from creation to export.
//!
//! # Data Flow
//! ```text
//! Tracer (started)
//!     → span.rs (open span, tags, guaranteed close via Drop)
//!     → recorder.rs (bounded concurrent buffer)
//!     → export.rs (batch submit to a pluggable backend)
//!
//! Lifecycle:
//!     start() spawns the periodic flush task
//!     stop() performs the final flush and closes the recorder
//! ```
//!
//! # Design Decisions
//! - Tracing is advisory: every failure here degrades to "no span",
//!   never to a failed request
//! - Export transport is behind the `SpanExporter` trait; this crate
//!   ships a log-line exporter and an in-memory one for tests

pub mod export;
pub mod recorder;
pub mod span;
pub mod tracer;

pub use export::{ExportError, LogExporter, MemoryExporter, SpanExporter};
pub use span::{Span, SpanData};
pub use tracer::{TraceError, Tracer};
