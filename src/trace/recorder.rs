//! Buffering of finished spans between handlers and the exporter.
//!
//! # Responsibilities
//! - Accept finished spans from any number of concurrent request tasks
//! - Bound memory: drop the oldest span when the buffer is full
//! - Drain the buffer into the exporter on flush
//!
//! # Design Decisions
//! - Single mutex around a ring buffer; record() holds it only for the
//!   push so request tasks never wait on an export
//! - Export runs outside the lock with the drained batch
//! - After close(), late spans (finished after tracer stop) are counted
//!   and discarded instead of panicking

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::trace::export::SpanExporter;
use crate::trace::span::SpanData;

pub struct SpanRecorder {
    buffer: Mutex<VecDeque<SpanData>>,
    capacity: usize,
    exporter: Arc<dyn SpanExporter>,
    accepting: AtomicBool,
    dropped: AtomicU64,
}

impl SpanRecorder {
    pub fn new(capacity: usize, exporter: Arc<dyn SpanExporter>) -> Self {
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            exporter,
            accepting: AtomicBool::new(true),
            dropped: AtomicU64::new(0),
        }
    }

    /// Buffer one finished span. Called from request tasks via `Span::drop`.
    pub fn record(&self, span: SpanData) {
        if !self.accepting.load(Ordering::Acquire) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        }
        let mut buffer = self.buffer.lock().unwrap();
        if buffer.len() >= self.capacity {
            buffer.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        buffer.push_back(span);
    }

    /// Drain the buffer and hand the batch to the exporter.
    ///
    /// Export failures are logged, not propagated: tracing must never
    /// disturb request handling.
    pub fn flush(&self) {
        let batch: Vec<SpanData> = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.drain(..).collect()
        };

        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            tracing::warn!(dropped, "spans dropped since last flush");
        }
        if batch.is_empty() {
            return;
        }

        let count = batch.len();
        if let Err(error) = self.exporter.submit(batch) {
            tracing::warn!(%error, count, "span export failed");
        } else {
            tracing::trace!(count, "spans flushed");
        }
    }

    /// Stop accepting spans. Spans recorded afterwards are discarded.
    pub fn close(&self) {
        self.accepting.store(false, Ordering::Release);
    }

    /// Spans currently buffered (test and introspection use).
    pub fn pending(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }
}
