//! Tracer lifecycle and span creation.
//!
//! # Data Flow
//! ```text
//! Tracer::new (Idle)
//!     → start(): spawn periodic flush task (Started)
//!     → start_span() per request → Span → recorder on finish
//!     → stop(): final flush, close recorder (Stopped)
//! ```
//!
//! # Design Decisions
//! - No global singleton: the tracer is constructed explicitly and shared
//!   by cloning (cheap `Arc` handle)
//! - start/stop are one-time transitions; stop() is idempotent
//! - Span creation while not Started returns an error; callers run the
//!   work untraced rather than failing it

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::TracingConfig;
use crate::trace::export::SpanExporter;
use crate::trace::recorder::SpanRecorder;
use crate::trace::span::{Span, SpanData};

/// Error from tracer operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("tracer has not been started")]
    NotStarted,

    #[error("tracer is stopped")]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Started,
    Stopped,
}

struct Inner {
    service: String,
    flush_interval: Duration,
    recorder: Arc<SpanRecorder>,
    state: Mutex<State>,
    // Signals the background flush task to exit.
    stop_tx: broadcast::Sender<()>,
}

/// Handle to the per-process tracer. Clones share one lifecycle.
#[derive(Clone)]
pub struct Tracer {
    inner: Arc<Inner>,
}

impl Tracer {
    /// Build an idle tracer. Call [`Tracer::start`] before creating spans.
    pub fn new(config: &TracingConfig, exporter: Arc<dyn SpanExporter>) -> Self {
        let (stop_tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(Inner {
                service: config.service_name.clone(),
                flush_interval: Duration::from_millis(config.flush_interval_ms),
                recorder: Arc::new(SpanRecorder::new(config.buffer_capacity, exporter)),
                state: Mutex::new(State::Idle),
                stop_tx,
            }),
        }
    }

    /// Service label applied to every span this tracer creates.
    pub fn service(&self) -> &str {
        &self.inner.service
    }

    /// Transition to Started and spawn the periodic flush task.
    ///
    /// Calling start on an already-started or stopped tracer logs and does
    /// nothing: tracer misuse is never fatal to the application.
    pub fn start(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            match *state {
                State::Idle => *state = State::Started,
                State::Started => {
                    tracing::warn!("tracer already started");
                    return;
                }
                State::Stopped => {
                    tracing::warn!("tracer cannot be restarted after stop");
                    return;
                }
            }
        }

        let recorder = self.inner.recorder.clone();
        let mut stop_rx = self.inner.stop_tx.subscribe();
        let period = self.inner.flush_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => recorder.flush(),
                    _ = stop_rx.recv() => break,
                }
            }
        });

        tracing::info!(
            service = %self.inner.service,
            flush_interval_ms = period.as_millis() as u64,
            "tracer started"
        );
    }

    /// Flush buffered spans, stop the flush task, and refuse new spans.
    ///
    /// Idempotent: stopping twice (or stopping an idle tracer) is a no-op.
    /// Spans still open at this point finish into a closed recorder and
    /// are discarded, not crashed on.
    pub fn stop(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if *state != State::Started {
                *state = State::Stopped;
                return;
            }
            *state = State::Stopped;
        }

        let _ = self.inner.stop_tx.send(());
        self.inner.recorder.flush();
        self.inner.recorder.close();
        tracing::info!(service = %self.inner.service, "tracer stopped");
    }

    /// Open a root span for one unit of work.
    ///
    /// Fails when the tracer is not in the Started state; callers are
    /// expected to proceed untraced on error.
    pub fn start_span(&self, name: &str) -> Result<Span, TraceError> {
        match *self.inner.state.lock().unwrap() {
            State::Idle => return Err(TraceError::NotStarted),
            State::Stopped => return Err(TraceError::Stopped),
            State::Started => {}
        }

        let data = SpanData::new(name, &self.inner.service, span_id(), span_id());
        Ok(Span::new(data, self.inner.recorder.clone()))
    }

    /// Force a flush of buffered spans (test and shutdown use).
    pub fn flush(&self) {
        self.inner.recorder.flush();
    }
}

/// Random 63-bit id, nonzero. Kept positive for compatibility with
/// backends that treat ids as signed integers.
fn span_id() -> u64 {
    fastrand::u64(1..(1 << 63))
}
