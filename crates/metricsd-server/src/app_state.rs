//! Shared application state for the collector.
//!
//! The metric storage is created empty once per process (or per test) and
//! shared by every handler through an `Arc`; nothing lives in globals.

use std::sync::Arc;

use metricsd_core::error::MetricsError;
use metricsd_core::{MetricKind, Storage};

use crate::config::ServerConfig;
use crate::handlers::ApiError;
use crate::obs::metrics::ServerMetrics;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServerConfig>,
    storage: Arc<Storage>,
    metrics: Arc<ServerMetrics>,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        Self::with_storage(cfg, Arc::new(Storage::new()))
    }

    /// Build state around an existing storage (tests inspect it directly).
    pub fn with_storage(cfg: ServerConfig, storage: Arc<Storage>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            storage,
            metrics: Arc::new(ServerMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.cfg
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.metrics
    }

    /// Account for a rejected request and turn it into a response error.
    pub fn reject(&self, op: &'static str, err: MetricsError) -> ApiError {
        let code = err.client_code();
        tracing::debug!(op, code = code.as_str(), error = %err, "request rejected");
        self.metrics.rejections.inc(&[("op", op), ("code", code.as_str())]);
        ApiError(err)
    }

    /// Extra `/metrics` lines computed at scrape time.
    pub fn metrics_extra(&self) -> Vec<(String, u64)> {
        MetricKind::ALL
            .iter()
            .map(|kind| {
                (
                    format!("metricsd_stored_series{{kind=\"{kind}\"}}"),
                    self.storage.len(*kind) as u64,
                )
            })
            .collect()
    }
}
