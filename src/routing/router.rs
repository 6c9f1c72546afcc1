//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Hold the pattern → handler table, built once at startup
//! - Select the most specific registration for a request path
//! - Answer unmatched paths with 404 and an empty body
//!
//! # Design Decisions
//! - Immutable after build (shared via `Arc`, no locks on the hot path)
//! - Most specific wins: exact beats prefix, longer prefix beats shorter
//! - Duplicate patterns: the last registration wins
//! - Unmatched requests never reach a handler, so no span is created
//!   for them

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};

use crate::http::handler::{Handler, HandlerResult};
use crate::routing::matcher::RoutePattern;

/// Immutable routing table.
pub struct Mux {
    routes: Vec<(RoutePattern, Arc<dyn Handler>)>,
}

/// Builder collecting registrations before the table is frozen.
#[derive(Default)]
pub struct MuxBuilder {
    routes: Vec<(RoutePattern, Arc<dyn Handler>)>,
}

impl MuxBuilder {
    /// Register a handler for a pattern (trailing `/` = subtree).
    pub fn handle(mut self, pattern: &str, handler: impl Handler) -> Self {
        self.routes
            .push((RoutePattern::parse(pattern), Arc::new(handler)));
        self
    }

    pub fn build(self) -> Mux {
        Mux {
            routes: self.routes,
        }
    }
}

impl Mux {
    pub fn builder() -> MuxBuilder {
        MuxBuilder::default()
    }

    /// Find the most specific registration matching the path.
    pub fn lookup(&self, path: &str) -> Option<&(RoutePattern, Arc<dyn Handler>)> {
        let mut best: Option<&(RoutePattern, Arc<dyn Handler>)> = None;
        for route in &self.routes {
            if !route.0.matches(path) {
                continue;
            }
            // >= so a later duplicate registration shadows an earlier one
            match best {
                Some(b) if route.0.specificity() < b.0.specificity() => {}
                _ => best = Some(route),
            }
        }
        best
    }

    /// Dispatch a request to the matching handler.
    ///
    /// No match yields a 404 with an empty body; handler errors propagate
    /// unchanged to the caller.
    pub async fn dispatch(&self, request: Request<Body>) -> HandlerResult {
        let path = request.uri().path().to_string();
        match self.lookup(&path) {
            Some((pattern, handler)) => {
                tracing::debug!(path = %path, pattern = %pattern.as_str(), "route matched");
                handler.call(request).await
            }
            None => {
                tracing::debug!(path = %path, "no route matched");
                let response = Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Body::empty())
                    .map_err(|e| crate::http::handler::HandlerError::Internal(e.to_string()))?;
                Ok(response)
            }
        }
    }

    /// Number of registrations (introspection and tests).
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
