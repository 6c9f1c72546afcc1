//! Span representation and lifecycle.
//!
//! # Responsibilities
//! - Hold the data describing one unit of traced work
//! - Enforce the open → closed transition exactly once
//! - Hand closed spans to the recorder
//!
//! # Design Decisions
//! - A `Span` is an owned handle; there is exactly one owner while open
//! - Closing is guaranteed via `Drop`: a span that goes out of scope
//!   without an explicit `finish()` is finished at that point
//! - Duration is measured with a monotonic clock so end >= start holds
//!   even across wall-clock adjustments

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::trace::recorder::SpanRecorder;

/// Closed-span payload handed to the recorder and exporters.
///
/// Field layout mirrors the common trace-agent shape: an operation name,
/// the owning service, a resource label (the route for HTTP spans), ids,
/// a start timestamp, a duration, an error flag, and string tags.
#[derive(Debug, Clone, Serialize)]
pub struct SpanData {
    /// Operation name, e.g. `http.request`.
    pub name: String,

    /// Service this span belongs to.
    pub service: String,

    /// What was being worked on, e.g. the matched route pattern.
    pub resource: String,

    /// Trace id shared by all spans of one trace.
    pub trace_id: u64,

    /// Id of this span.
    pub span_id: u64,

    /// Id of the parent span, 0 for root spans.
    pub parent_id: u64,

    /// Start time as nanoseconds since the Unix epoch.
    pub start_ns: u64,

    /// Wall duration in nanoseconds. `None` while the span is open.
    pub duration_ns: Option<u64>,

    /// Whether the unit of work failed.
    pub error: bool,

    /// String key/value tags (service label, route, status code, ...).
    pub meta: HashMap<String, String>,
}

impl SpanData {
    pub(crate) fn new(name: &str, service: &str, trace_id: u64, span_id: u64) -> Self {
        let start_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self {
            name: name.to_string(),
            service: service.to_string(),
            resource: name.to_string(),
            trace_id,
            span_id,
            parent_id: 0,
            start_ns,
            duration_ns: None,
            error: false,
            meta: HashMap::new(),
        }
    }

    /// True once the span has been closed.
    pub fn is_finished(&self) -> bool {
        self.duration_ns.is_some()
    }
}

/// An open span. Mutable while held; immutable once finished.
///
/// Dropping the handle finishes the span if `finish()` was never called,
/// so every exit path of the instrumented work closes the span.
pub struct Span {
    data: Option<SpanData>,
    started: Instant,
    recorder: Arc<SpanRecorder>,
}

impl Span {
    pub(crate) fn new(data: SpanData, recorder: Arc<SpanRecorder>) -> Self {
        Self {
            data: Some(data),
            started: Instant::now(),
            recorder,
        }
    }

    /// Set a string tag. No-op after the span is finished.
    pub fn set_tag(&mut self, key: &str, value: impl Into<String>) {
        if let Some(data) = self.data.as_mut() {
            data.meta.insert(key.to_string(), value.into());
        }
    }

    /// Replace the resource label (for HTTP spans, the matched route).
    pub fn set_resource(&mut self, resource: &str) {
        if let Some(data) = self.data.as_mut() {
            data.resource = resource.to_string();
        }
    }

    /// Record the HTTP status code. Server errors mark the span errored.
    pub fn set_status_code(&mut self, status: u16) {
        if let Some(data) = self.data.as_mut() {
            data.meta
                .insert("http.status_code".to_string(), status.to_string());
            if status >= 500 {
                data.error = true;
            }
        }
    }

    /// Mark the span errored with a message tag.
    pub fn set_error(&mut self, message: &str) {
        if let Some(data) = self.data.as_mut() {
            data.error = true;
            data.meta
                .insert("error.message".to_string(), message.to_string());
        }
    }

    /// Close the span and submit it to the recorder.
    pub fn finish(mut self) {
        self.finish_inner();
    }

    fn finish_inner(&mut self) {
        if let Some(mut data) = self.data.take() {
            data.duration_ns = Some(self.started.elapsed().as_nanos() as u64);
            self.recorder.record(data);
        }
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        self.finish_inner();
    }
}
