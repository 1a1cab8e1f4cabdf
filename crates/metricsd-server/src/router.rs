//! Axum router wiring.
//!
//! Updates share one route and are dispatched on the metric type token inside
//! the handler. Reads are routed by a fixed prefix per kind. Method filtering
//! (405) happens here before any handler runs.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list::list))
        .route("/update/*rest", post(handlers::update::update))
        .route("/value/gauge/*rest", get(handlers::value::gauge))
        .route("/value/counter/*rest", get(handlers::value::counter))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track))
        .fallback(handlers::not_found)
        .with_state(state)
}
