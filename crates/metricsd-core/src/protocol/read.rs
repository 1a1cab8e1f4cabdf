//! Read path decoding: `/value/<kind>/<name>`.

use super::path::{segment, validate_name};
use super::update::NAME_SEGMENT;
use super::MetricKind;
use crate::error::{MetricsError, Result};

/// `"", "value", <kind>, <name>`
pub const READ_SEGMENTS: usize = 4;

/// Name of a read path with exactly four (decoded) segments.
pub fn read_target<S: AsRef<str>>(kind: MetricKind, segments: &[S]) -> Result<&str> {
    if segments.len() != READ_SEGMENTS {
        return Err(MetricsError::MalformedPath(format!(
            "expected format: /value/{kind}/<metricName>"
        )));
    }
    let name = segment(segments, NAME_SEGMENT)?;
    validate_name(name)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::ClientCode;
    use crate::protocol::decode_path;

    #[test]
    fn requires_four_segments() {
        let segments = decode_path("/value/counter/PollCount").unwrap();
        assert_eq!(read_target(MetricKind::Counter, &segments).unwrap(), "PollCount");

        let segments = decode_path("/value/counter/PollCount/extra").unwrap();
        let err = read_target(MetricKind::Counter, &segments).unwrap_err();
        assert_eq!(err.client_code(), ClientCode::MalformedPath);
    }

    #[test]
    fn returns_decoded_name() {
        let segments = decode_path("/value/gauge/my%20metric/").unwrap();
        assert_eq!(read_target(MetricKind::Gauge, &segments).unwrap(), "my metric");
    }
}
