//! Self-observability for the collector.
//!
//! Request accounting is kept in lock-sharded atomics and rendered in
//! Prometheus text format by the `/metrics` handler. `track` is the
//! per-route middleware that feeds it.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub async fn track(
    State(app): State<AppState>,
    matched: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    let route = matched.as_str();
    let m = app.metrics();

    m.http_inflight.inc(&[("route", route)]);
    let started = Instant::now();
    let resp = next.run(req).await;
    m.http_inflight.dec(&[("route", route)]);

    m.http_duration.observe(&[("route", route)], started.elapsed());
    m.http_requests
        .inc(&[("route", route), ("status", resp.status().as_str())]);
    resp
}
