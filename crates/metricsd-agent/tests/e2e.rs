//! Agent against a real collector on a loopback port.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use metricsd_agent::{HttpReporter, Poller, Reporter, Sampler};
use metricsd_core::{MetricKind, MetricValue, Update};
use metricsd_server::{app_state::AppState, config::ServerConfig, serve};

struct FixedSampler;

impl Sampler for FixedSampler {
    fn sample(&self) -> Vec<(String, f64)> {
        vec![("VmRSS".into(), 3_584_000.0), ("VmSize".into(), 11_264_000.0)]
    }
}

async fn start_server() -> (String, AppState, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(ServerConfig::default());
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server_state = state.clone();
    tokio::spawn(async move {
        serve::run(listener, server_state, async {
            let _ = stop_rx.await;
        })
        .await
        .unwrap();
    });

    (format!("http://{addr}"), state, stop_tx)
}

#[tokio::test]
async fn cycles_land_in_the_collector() {
    let (url, state, stop) = start_server().await;
    let reporter = HttpReporter::new(&url, Duration::from_secs(5)).unwrap();
    let mut poller = Poller::new(Arc::new(reporter), Box::new(FixedSampler));

    for _ in 0..3 {
        let report = poller.run_cycle().await;
        assert_eq!(report.failed, 0);
        assert_eq!(report.sent, 4);
    }

    let storage = state.storage();
    assert_eq!(
        storage.get(MetricKind::Counter, "PollCount"),
        Some(MetricValue::Counter(3))
    );
    assert_eq!(
        storage.get(MetricKind::Gauge, "VmRSS"),
        Some(MetricValue::Gauge(3_584_000.0))
    );
    match storage.get(MetricKind::Gauge, "RandomValue") {
        Some(MetricValue::Gauge(v)) => assert!((0.0..1.0).contains(&v)),
        other => panic!("unexpected RandomValue: {other:?}"),
    }

    let _ = stop.send(());
}

#[tokio::test]
async fn reporter_returns_confirmation_text() {
    let (url, _state, stop) = start_server().await;
    let reporter = HttpReporter::new(&url, Duration::from_secs(5)).unwrap();

    let body = reporter.report(&Update::counter("testCounter", 10)).await.unwrap();
    assert_eq!(body, "Counter metric 'testCounter' updated to 10 successfully.");

    let body = reporter.report(&Update::gauge("testGauge", 75.5)).await.unwrap();
    assert_eq!(body, "Gauge metric 'testGauge' set to 75.50 successfully.");

    let _ = stop.send(());
}

#[tokio::test]
async fn names_with_spaces_survive_the_wire() {
    let (url, state, stop) = start_server().await;
    let reporter = HttpReporter::new(&url, Duration::from_secs(5)).unwrap();

    let body = reporter.report(&Update::gauge("a b", 1.0)).await.unwrap();
    assert_eq!(body, "Gauge metric 'a b' set to 1.00 successfully.");
    assert_eq!(
        state.storage().get(MetricKind::Gauge, "a b"),
        Some(MetricValue::Gauge(1.0))
    );

    let _ = stop.send(());
}

#[tokio::test]
async fn unreachable_collector_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let reporter = HttpReporter::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();

    let err = reporter.report(&Update::counter("PollCount", 1)).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "TRANSPORT");
}
