//! Pipeline tests: span lifecycle around handler invocations.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use spanmux::http::{DelayedOk, HandlerError, TracedMuxBuilder};

mod common;

fn ok_handler() -> impl spanmux::http::Handler {
    |_req: Request<Body>| async {
        let response = Response::builder()
            .status(StatusCode::OK)
            .body(Body::empty())
            .unwrap();
        Ok::<_, HandlerError>(response)
    }
}

fn failing_handler() -> impl spanmux::http::Handler {
    |_req: Request<Body>| async {
        Err::<Response<Body>, _>(HandlerError::Internal("backing store unavailable".into()))
    }
}

#[allow(unreachable_code)]
fn panicking_handler() -> impl spanmux::http::Handler {
    |_req: Request<Body>| async {
        panic!("handler exploded");
        Ok::<Response<Body>, HandlerError>(Response::new(Body::empty()))
    }
}

#[tokio::test]
async fn test_one_span_per_invocation_with_duration() {
    let (tracer, exporter) = common::started_tracer();
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/", DelayedOk::new(Duration::from_millis(2)))
        .build();

    let response = mux.dispatch(common::get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    tracer.flush();
    let spans = exporter.take();
    assert_eq!(spans.len(), 1, "exactly one span per invocation");

    let span = &spans[0];
    assert_eq!(span.name, "http.request");
    assert_eq!(span.service, "test-service");
    assert_eq!(span.resource, "/");
    assert_eq!(span.meta.get("http.route").map(String::as_str), Some("/"));
    assert_eq!(
        span.meta.get("http.status_code").map(String::as_str),
        Some("200")
    );
    assert!(!span.error);
    assert!(
        span.duration_ns.unwrap() >= 2_000_000,
        "span covers the 2ms of simulated work"
    );
}

#[tokio::test]
async fn test_handler_error_closes_span_and_propagates() {
    let (tracer, exporter) = common::started_tracer();
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/fail", failing_handler())
        .build();

    let outcome = mux.dispatch(common::get("/fail")).await;
    assert!(matches!(outcome, Err(HandlerError::Internal(_))));

    tracer.flush();
    let spans = exporter.take();
    assert_eq!(spans.len(), 1);
    assert!(spans[0].error);
    assert!(spans[0].duration_ns.is_some(), "span closed despite the fault");
    assert!(spans[0]
        .meta
        .get("error.message")
        .unwrap()
        .contains("backing store unavailable"));
}

#[tokio::test]
async fn test_handler_panic_closes_span_and_propagates() {
    let (tracer, exporter) = common::started_tracer();
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/boom", panicking_handler())
        .build();

    let outcome = mux.dispatch(common::get("/boom")).await;
    match outcome {
        Err(HandlerError::Panic(message)) => assert!(message.contains("handler exploded")),
        other => panic!("expected panic error, got {:?}", other.map(|r| r.status())),
    }

    tracer.flush();
    let spans = exporter.take();
    assert_eq!(spans.len(), 1);
    assert!(spans[0].error);
    assert_eq!(
        spans[0].meta.get("error.type").map(String::as_str),
        Some("panic")
    );
}

#[tokio::test]
async fn test_unstarted_tracer_degrades_gracefully() {
    let (tracer, exporter) = common::idle_tracer();
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/", ok_handler())
        .build();

    let response = mux.dispatch(common::get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    tracer.flush();
    assert!(exporter.take().is_empty(), "no span without a started tracer");
}

#[tokio::test]
async fn test_unmatched_route_is_404_without_span() {
    let (tracer, exporter) = common::started_tracer();
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/known", ok_handler())
        .build();

    let response = mux.dispatch(common::get("/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    tracer.flush();
    assert!(exporter.take().is_empty(), "unmatched routes are not traced");
}

#[tokio::test]
async fn test_concurrent_requests_record_independent_spans() {
    let (tracer, exporter) = common::started_tracer();
    let mux = Arc::new(
        TracedMuxBuilder::new(tracer.clone())
            .handle("/", DelayedOk::new(Duration::from_millis(2)))
            .build(),
    );

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let mux = mux.clone();
        tasks.push(tokio::spawn(async move {
            mux.dispatch(common::get("/")).await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    tracer.flush();
    let spans = exporter.take();
    assert_eq!(spans.len(), 16);
    for span in &spans {
        assert!(span.duration_ns.unwrap() >= 2_000_000);
    }
}

#[tokio::test]
async fn test_stop_twice_after_traffic() {
    let (tracer, exporter) = common::started_tracer();
    let mux = TracedMuxBuilder::new(tracer.clone())
        .handle("/", ok_handler())
        .build();

    mux.dispatch(common::get("/")).await.unwrap();

    tracer.stop();
    tracer.stop();
    assert_eq!(exporter.take().len(), 1, "stop flushed the recorded span");

    // After stop the handler still serves, just untraced.
    let response = mux.dispatch(common::get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(exporter.take().is_empty());
}
