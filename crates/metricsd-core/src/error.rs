//! Shared error type across metricsd crates.

use thiserror::Error;

use crate::protocol::MetricKind;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Request path has the wrong shape (segment count, empty name).
    MalformedPath,
    /// `Content-Type` is not `text/plain`.
    UnsupportedMediaType,
    /// Value segment does not parse as the kind's numeric type.
    InvalidValue,
    /// Metric type token is neither `gauge` nor `counter`.
    UnknownMetricType,
    /// Metric was never written.
    NotFound,
    /// Configuration rejected at startup.
    InvalidConfig,
    /// Outbound delivery failed.
    Transport,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MalformedPath => "MALFORMED_PATH",
            ClientCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ClientCode::InvalidValue => "INVALID_VALUE",
            ClientCode::UnknownMetricType => "UNKNOWN_METRIC_TYPE",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::Transport => "TRANSPORT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core, server and agent.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("malformed path: {0}")]
    MalformedPath(String),
    #[error("unsupported media type: {0:?}, use text/plain")]
    UnsupportedContentType(String),
    #[error("invalid {kind} value: {raw:?}")]
    InvalidValue { kind: MetricKind, raw: String },
    #[error("unknown metric type: {0}")]
    UnknownMetricType(String),
    #[error("{kind} metric not found: {name}")]
    MetricNotFound { kind: MetricKind, name: String },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::MalformedPath(_) => ClientCode::MalformedPath,
            MetricsError::UnsupportedContentType(_) => ClientCode::UnsupportedMediaType,
            MetricsError::InvalidValue { .. } => ClientCode::InvalidValue,
            MetricsError::UnknownMetricType(_) => ClientCode::UnknownMetricType,
            MetricsError::MetricNotFound { .. } => ClientCode::NotFound,
            MetricsError::InvalidConfig(_) => ClientCode::InvalidConfig,
            MetricsError::Transport(_) => ClientCode::Transport,
            MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
