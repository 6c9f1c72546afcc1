//! Shared utilities for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use spanmux::config::TracingConfig;
use spanmux::trace::{MemoryExporter, Tracer};

/// A tracer in the Started state backed by an in-memory exporter.
pub fn started_tracer() -> (Tracer, Arc<MemoryExporter>) {
    let exporter = Arc::new(MemoryExporter::new());
    let config = TracingConfig {
        service_name: "test-service".into(),
        ..TracingConfig::default()
    };
    let tracer = Tracer::new(&config, exporter.clone());
    tracer.start();
    (tracer, exporter)
}

/// A tracer that was never started (Idle), for degradation tests.
#[allow(dead_code)]
pub fn idle_tracer() -> (Tracer, Arc<MemoryExporter>) {
    let exporter = Arc::new(MemoryExporter::new());
    let config = TracingConfig {
        service_name: "test-service".into(),
        ..TracingConfig::default()
    };
    let tracer = Tracer::new(&config, exporter.clone());
    (tracer, exporter)
}

#[allow(dead_code)]
pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}
