//! Span-recording handler wrapper.
//!
//! # Responsibilities
//! - Open one span per handler invocation, tagged with route and method
//! - Record the response status (5xx marks the span errored)
//! - Close the span on every exit path: success, error return, panic
//! - Propagate the handler's outcome unchanged
//!
//! # Design Decisions
//! - Explicit decorator object, not a hidden global hook: the wrapper
//!   holds the inner handler and a tracer handle
//! - If the tracer is not started, the inner handler still runs and its
//!   response is returned untraced; tracing never blocks the application
//! - Panics are caught, surfaced as `HandlerError::Panic`, and tagged on
//!   the span before the error propagates

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::body::Body;
use axum::http::Request;
use futures_util::FutureExt;

use crate::http::handler::{BoxFuture, Handler, HandlerError, HandlerResult};
use crate::routing::{Mux, MuxBuilder};
use crate::trace::Tracer;

/// Decorator that records one span around each invocation of `inner`.
pub struct TracedHandler<H> {
    inner: H,
    tracer: Tracer,
    route: String,
}

impl<H: Handler> TracedHandler<H> {
    pub fn new(inner: H, tracer: Tracer, route: &str) -> Self {
        Self {
            inner,
            tracer,
            route: route.to_string(),
        }
    }
}

impl<H: Handler> Handler for TracedHandler<H> {
    fn call(&self, request: Request<Body>) -> BoxFuture<HandlerResult> {
        let mut span = match self.tracer.start_span("http.request") {
            Ok(span) => span,
            Err(error) => {
                // Degrade gracefully: run the handler untraced.
                tracing::trace!(%error, route = %self.route, "request not traced");
                return self.inner.call(request);
            }
        };

        span.set_resource(&self.route);
        span.set_tag("http.route", self.route.clone());
        span.set_tag("http.method", request.method().to_string());
        span.set_tag("http.url", request.uri().path().to_string());
        span.set_tag("span.kind", "server");
        if let Some(id) = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
        {
            span.set_tag("request.id", id.to_string());
        }

        let work = AssertUnwindSafe(self.inner.call(request)).catch_unwind();
        Box::pin(async move {
            match work.await {
                Ok(Ok(response)) => {
                    span.set_status_code(response.status().as_u16());
                    span.finish();
                    Ok(response)
                }
                Ok(Err(error)) => {
                    span.set_error(&error.to_string());
                    span.finish();
                    Err(error)
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    span.set_error(&message);
                    span.set_tag("error.type", "panic");
                    span.finish();
                    Err(HandlerError::Panic(message))
                }
            }
        })
    }
}

/// Builder that wraps every registration in a [`TracedHandler`] before
/// handing it to the routing table.
///
/// The service label on the spans comes from the tracer; the route label
/// is the pattern as registered. Unmatched requests bypass the wrappers
/// entirely, so they produce no span.
pub struct TracedMuxBuilder {
    tracer: Tracer,
    mux: MuxBuilder,
}

impl TracedMuxBuilder {
    pub fn new(tracer: Tracer) -> Self {
        Self {
            tracer,
            mux: Mux::builder(),
        }
    }

    /// Register a handler; it will be invoked through the span wrapper.
    pub fn handle(mut self, pattern: &str, handler: impl Handler) -> Self {
        let wrapped = TracedHandler::new(handler, self.tracer.clone(), pattern);
        self.mux = self.mux.handle(pattern, wrapped);
        self
    }

    pub fn build(self) -> Mux {
        self.mux.build()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
