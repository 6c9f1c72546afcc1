//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum router with a catch-all delegating to the mux
//! - Wire middleware (request timeout, access logging, request IDs)
//! - Serve connections with graceful shutdown
//!
//! # Design Decisions
//! - axum's own routing is a two-entry catch-all; path selection is the
//!   mux's job so registrations and span labels stay in one place
//! - Handler faults reach this boundary as `HandlerError` and are
//!   converted to a plain 500; the span was already closed by then
//! - Bind failures are surfaced to the caller and are fatal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header::HeaderName, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::routing::Mux;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// State shared with the catch-all handler.
#[derive(Clone)]
struct AppState {
    mux: Arc<Mux>,
}

/// HTTP server hosting the instrumented mux.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &AppConfig, mux: Arc<Mux>) -> Self {
        let state = AppState { mux };
        let router = Router::new()
            .route("/", any(serve))
            .route("/{*path}", any(serve))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Accept connections until the shutdown signal fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all: stamp a request ID, then dispatch through the mux.
async fn serve(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    if !request.headers().contains_key(&X_REQUEST_ID) {
        let id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            request.headers_mut().insert(X_REQUEST_ID, value);
        }
    }

    match state.mux.dispatch(request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(%error, "handler failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}
