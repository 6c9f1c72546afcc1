//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML and carry
//! defaults so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Tracer settings.
    pub tracing: TracingConfig,

    /// Demo handler settings.
    pub handler: HandlerConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g. "0.0.0.0:80").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:80".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Tracer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Service label applied to every span.
    pub service_name: String,

    /// When false the tracer is never started and requests run untraced.
    pub enabled: bool,

    /// Maximum finished spans buffered between flushes.
    pub buffer_capacity: usize,

    /// Period of the background flush task, in milliseconds.
    pub flush_interval_ms: u64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "spanmux".to_string(),
            enabled: true,
            buffer_capacity: 1024,
            flush_interval_ms: 2000,
        }
    }
}

/// Demo handler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Simulated work before responding, in milliseconds.
    ///
    /// Nonzero so the span is not barely visible in a trace flame view.
    pub delay_ms: u64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self { delay_ms: 2 }
    }
}
