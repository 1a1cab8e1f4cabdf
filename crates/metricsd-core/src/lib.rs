//! metricsd core: transport-agnostic protocol primitives, metric stores and
//! the error surface.
//!
//! This crate defines the update/read wire contract and the merge semantics
//! shared by the collector server and the reporting agent. It carries no
//! transport or runtime dependencies so both sides (and tests) can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result` so a malformed
//! request can never take the collector down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod store;

/// Shared result type.
pub use error::{Result, MetricsError};
pub use protocol::{MetricKind, MetricValue, Update};
pub use store::{CounterStore, GaugeStore, Snapshot, Storage};
