//! Metric update codec.
//!
//! Decoding rules (applied in this order by the server):
//! - metric kind from segment 2 (`UnknownMetricType` if not recognized)
//! - exactly five segments and a non-empty name
//! - `Content-Type` must be exactly `text/plain`
//! - value must parse as the kind's numeric type

use std::fmt;
use std::str::FromStr;

use super::path::{encode_segment, segment, validate_name};
use crate::error::{MetricsError, Result};

/// The only content type accepted on updates.
pub const TEXT_PLAIN: &str = "text/plain";

/// `"", "update", <kind>, <name>, <value>`
pub const UPDATE_SEGMENTS: usize = 5;

pub(crate) const KIND_SEGMENT: usize = 2;
pub(crate) const NAME_SEGMENT: usize = 3;
const VALUE_SEGMENT: usize = 4;

/// Closed set of metric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Last write wins, `f64`.
    Gauge,
    /// Accumulates deltas, `i64`.
    Counter,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::Gauge, MetricKind::Counter];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }

    /// Resolve the kind token of a split request path.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        segments
            .get(KIND_SEGMENT)
            .ok_or_else(|| MetricsError::MalformedPath("missing metric type".into()))?
            .as_ref()
            .parse()
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gauge" => Ok(MetricKind::Gauge),
            "counter" => Ok(MetricKind::Counter),
            other => Err(MetricsError::UnknownMetricType(other.to_string())),
        }
    }
}

/// A typed metric value. For counters this is a delta on the wire and a
/// running total in the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(i64),
}

impl MetricValue {
    /// Parse the value segment as `kind`'s numeric type.
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self> {
        let invalid = || MetricsError::InvalidValue {
            kind,
            raw: raw.to_string(),
        };
        match kind {
            MetricKind::Gauge => raw.parse::<f64>().map(Self::Gauge).map_err(|_| invalid()),
            MetricKind::Counter => raw.parse::<i64>().map(Self::Counter).map_err(|_| invalid()),
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Counter(_) => MetricKind::Counter,
        }
    }
}

/// Wire encoding of the value segment (full precision, reparsable).
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Gauge(v) => write!(f, "{v}"),
            MetricValue::Counter(v) => write!(f, "{v}"),
        }
    }
}

/// One metric update as carried by `/update/<kind>/<name>/<value>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub name: String,
    pub value: MetricValue,
}

impl Update {
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: MetricValue::Gauge(value),
        }
    }

    pub fn counter(name: impl Into<String>, delta: i64) -> Self {
        Self {
            name: name.into(),
            value: MetricValue::Counter(delta),
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }

    /// Decode an already-routed update path (segments already
    /// percent-decoded). `kind` comes from [`MetricKind::from_segments`].
    pub fn decode<S: AsRef<str>>(
        kind: MetricKind,
        segments: &[S],
        content_type: Option<&str>,
    ) -> Result<Self> {
        let (name, raw) = update_target(kind, segments)?;
        check_content_type(content_type)?;
        let value = MetricValue::parse(kind, raw)?;
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }

    /// Encode as a request path: `/update/<kind>/<name>/<value>`, with the
    /// name percent-encoded.
    pub fn to_path(&self) -> Result<String> {
        validate_name(&self.name)?;
        Ok(format!(
            "/update/{}/{}/{}",
            self.kind(),
            encode_segment(&self.name),
            self.value
        ))
    }
}

/// Name and raw value of an update path with exactly five segments.
pub fn update_target<S: AsRef<str>>(kind: MetricKind, segments: &[S]) -> Result<(&str, &str)> {
    if segments.len() != UPDATE_SEGMENTS {
        return Err(MetricsError::MalformedPath(format!(
            "expected format: /update/{kind}/<metricName>/<value>"
        )));
    }
    let name = segment(segments, NAME_SEGMENT)?;
    validate_name(name)?;
    Ok((name, segment(segments, VALUE_SEGMENT)?))
}

/// Only the exact `text/plain` value is accepted (no charset parameter).
pub fn check_content_type(content_type: Option<&str>) -> Result<()> {
    match content_type {
        Some(TEXT_PLAIN) => Ok(()),
        Some(other) => Err(MetricsError::UnsupportedContentType(other.to_string())),
        None => Err(MetricsError::UnsupportedContentType(String::new())),
    }
}
