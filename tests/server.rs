//! End-to-end tests: real listener, real HTTP client, real spans.

use std::sync::Arc;
use std::time::Duration;

use spanmux::config::AppConfig;
use spanmux::http::{DelayedOk, HttpServer, TracedMuxBuilder};
use spanmux::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn test_get_root_returns_200_and_records_span() {
    let (tracer, exporter) = common::started_tracer();

    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/", DelayedOk::new(Duration::from_millis(2)))
        .build();

    let config = AppConfig::default();
    let server = HttpServer::new(&config, Arc::new(mux));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server_task = tokio::spawn(async move { server.run(listener, rx).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // GET / → 200 with an empty body after the simulated delay.
    let response = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(response.status(), 200);
    assert!(response.bytes().await.unwrap().is_empty());

    // GET /missing → 404 from the mux default.
    let response = client
        .get(format!("http://{}/missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    shutdown.trigger();
    server_task.await.unwrap().unwrap();
    tracer.stop();

    let spans = exporter.take();
    assert_eq!(spans.len(), 1, "only the matched route is traced");

    let span = &spans[0];
    assert_eq!(span.resource, "/");
    assert_eq!(
        span.meta.get("http.status_code").map(String::as_str),
        Some("200")
    );
    assert!(span.duration_ns.unwrap() >= 2_000_000);
    assert!(
        span.meta.contains_key("request.id"),
        "server stamps a request id that the span picks up"
    );
}

#[tokio::test]
#[allow(unreachable_code)]
async fn test_server_survives_handler_fault() {
    let (tracer, exporter) = common::started_tracer();

    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/boom", |_req: axum::http::Request<axum::body::Body>| async {
            panic!("boom");
            Ok::<_, spanmux::http::HandlerError>(axum::response::Response::new(
                axum::body::Body::empty(),
            ))
        })
        .handle("/", DelayedOk::new(Duration::from_millis(1)))
        .build();

    let config = AppConfig::default();
    let server = HttpServer::new(&config, Arc::new(mux));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server_task = tokio::spawn(async move { server.run(listener, rx).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // The fault surfaces as a plain 500 to the client.
    let response = client
        .get(format!("http://{}/boom", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    // The server keeps serving afterwards.
    let response = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(response.status(), 200);

    shutdown.trigger();
    server_task.await.unwrap().unwrap();
    tracer.stop();

    let spans = exporter.take();
    assert_eq!(spans.len(), 2);
    let boom = spans.iter().find(|s| s.resource == "/boom").unwrap();
    assert!(boom.error);
    assert_eq!(boom.meta.get("error.type").map(String::as_str), Some("panic"));
}
