//! Span export seam.
//!
//! # Responsibilities
//! - Define the contract the tracer uses to hand off finished spans
//! - Provide a log-based exporter for local inspection
//! - Provide an in-memory exporter for tests
//!
//! # Design Decisions
//! - Transport is out of scope: the pipeline only needs "submit batch"
//!   and "flush", so backends plug in behind a trait object
//! - Export failures are surfaced to the caller but never reach request
//!   handling; the recorder logs and keeps serving

use std::sync::Mutex;

use thiserror::Error;

use crate::trace::span::SpanData;

/// Error from a span export attempt.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize span: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("export backend unavailable: {0}")]
    Unavailable(String),
}

/// Destination for finished spans.
///
/// Implementations must tolerate concurrent `submit` calls.
pub trait SpanExporter: Send + Sync {
    /// Deliver a batch of finished spans.
    fn submit(&self, batch: Vec<SpanData>) -> Result<(), ExportError>;

    /// Push any internally buffered data out. Default: nothing buffered.
    fn flush(&self) -> Result<(), ExportError> {
        Ok(())
    }
}

/// Exporter that emits each span as a JSON log line.
///
/// The default backend for the demo binary: spans show up in the process
/// log under the `spanmux::export` target at debug level.
#[derive(Debug, Default)]
pub struct LogExporter;

impl LogExporter {
    pub fn new() -> Self {
        Self
    }
}

impl SpanExporter for LogExporter {
    fn submit(&self, batch: Vec<SpanData>) -> Result<(), ExportError> {
        for span in batch {
            let json = serde_json::to_string(&span)?;
            tracing::debug!(target: "spanmux::export", span = %json, "span exported");
        }
        Ok(())
    }
}

/// Exporter that retains submitted spans in memory.
///
/// Test tooling: assertions inspect what the pipeline recorded.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    spans: Mutex<Vec<SpanData>>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything submitted so far.
    pub fn take(&self) -> Vec<SpanData> {
        std::mem::take(&mut self.spans.lock().unwrap())
    }

    /// Number of spans currently held.
    pub fn len(&self) -> usize {
        self.spans.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpanExporter for MemoryExporter {
    fn submit(&self, mut batch: Vec<SpanData>) -> Result<(), ExportError> {
        self.spans.lock().unwrap().append(&mut batch);
        Ok(())
    }
}
