//! metricsd reporting agent.
//!
//! Periodically samples process memory statistics, adds a random gauge and a
//! poll counter, and pushes every value to the collector as one
//! `POST /update/<kind>/<name>/<value>` request each.

pub mod config;
pub mod poller;
pub mod reporter;
pub mod sampler;

pub use poller::{CycleReport, Poller};
pub use reporter::{HttpReporter, Reporter};
pub use sampler::{MemorySampler, Sampler};
