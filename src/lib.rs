//! Instrumented HTTP mux: per-request trace spans with an explicit
//! tracer lifecycle.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod trace;

pub use config::AppConfig;
pub use http::{HttpServer, TracedMuxBuilder};
pub use lifecycle::Shutdown;
pub use trace::Tracer;
