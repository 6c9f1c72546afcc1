//! spanmux — an instrumented HTTP mux.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                   SPANMUX                     │
//!                    │                                               │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ routing │──▶│ traced      │  │
//!                    │  │ server │   │   mux   │   │ handler     │  │
//!                    │  └────────┘   └─────────┘   └──────┬──────┘  │
//!                    │                                    │ span    │
//!                    │                                    ▼         │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │  trace: span → recorder → exporter      │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    │                                               │
//!                    │  cross-cutting: config · lifecycle · logging  │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! The demo registers one handler on `/` that sleeps briefly and returns
//! 200, so each request produces one visible span in the export log.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use spanmux::config::{load_config, AppConfig};
use spanmux::http::{DelayedOk, HttpServer, TracedMuxBuilder};
use spanmux::lifecycle::Shutdown;
use spanmux::observability::logging;
use spanmux::trace::{LogExporter, Tracer};

#[derive(Parser, Debug)]
#[command(name = "spanmux", about = "Instrumented HTTP mux demo server")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        service = %config.tracing.service_name,
        tracing_enabled = config.tracing.enabled,
        "configuration loaded"
    );

    // Tracer lifecycle: started before any request, stopped after drain.
    let tracer = Tracer::new(&config.tracing, Arc::new(LogExporter::new()));
    if config.tracing.enabled {
        tracer.start();
    }

    let delay = std::time::Duration::from_millis(config.handler.delay_ms);
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/", DelayedOk::new(delay))
        .build();

    // Bind failure is fatal: nothing can be served without a listener.
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(&config, Arc::new(mux));
    server.run(listener, shutdown.subscribe()).await?;

    // In-flight requests have drained; flush what they recorded.
    tracer.stop();
    tracing::info!("shutdown complete");
    Ok(())
}
