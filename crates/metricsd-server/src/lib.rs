//! metricsd collector library entry.
//!
//! This crate wires the metric stores, the update/read handlers, config
//! loading and self-observability into an axum service. It is consumed by the
//! binary (`main.rs`), by the agent's end-to-end tests and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod serve;
