//! Handler contract and stock handlers.
//!
//! # Responsibilities
//! - Define the request → response contract handlers implement
//! - Model handler faults as an explicit error type
//! - Provide the demo root handler (short delay, 200, empty body)
//!
//! # Design Decisions
//! - Handlers return `Result` rather than relying on panics; panics that
//!   do happen are converted to `HandlerError::Panic` by the wrapper
//! - Closures returning futures implement `Handler` via a blanket impl,
//!   so registrations stay terse

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use thiserror::Error;

/// Fault from a request handler.
///
/// The wrapper tags the span and the server boundary turns this into a
/// 500; the error itself propagates unchanged through dispatch.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("handler panicked: {0}")]
    Panic(String),

    #[error("handler failed: {0}")]
    Internal(String),
}

pub type HandlerResult = Result<Response<Body>, HandlerError>;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A request handler: one HTTP exchange in, one HTTP exchange out.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>) -> BoxFuture<HandlerResult>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<HandlerResult> {
        Box::pin((self)(request))
    }
}

/// Demo root handler: sleep briefly, then 200 with an empty body.
///
/// The sleep gives the span visible width in a trace flame view; it is
/// a plain suspension point and holds nothing while waiting.
pub struct DelayedOk {
    delay: Duration,
}

impl DelayedOk {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Handler for DelayedOk {
    fn call(&self, _request: Request<Body>) -> BoxFuture<HandlerResult> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            let response = Response::builder()
                .status(StatusCode::OK)
                .body(Body::empty())
                .map_err(|e| HandlerError::Internal(e.to_string()))?;
            Ok(response)
        })
    }
}
