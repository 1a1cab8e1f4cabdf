//! Top-level facade crate for metricsd.
//!
//! Re-exports the core types, the collector server and the reporting agent so
//! users can depend on a single crate.

pub mod core {
    pub use metricsd_core::*;
}

pub mod server {
    pub use metricsd_server::*;
}

pub mod agent {
    pub use metricsd_agent::*;
}
