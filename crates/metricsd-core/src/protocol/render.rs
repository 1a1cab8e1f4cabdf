//! Plain-text rendering of stored values and update confirmations.

use super::update::MetricValue;

/// Gauges are always shown with two decimals.
pub fn gauge(value: f64) -> String {
    format!("{value:.2}")
}

pub fn counter(value: i64) -> String {
    value.to_string()
}

/// Body of a successful read.
pub fn value(value: MetricValue) -> String {
    match value {
        MetricValue::Gauge(v) => gauge(v),
        MetricValue::Counter(v) => counter(v),
    }
}

/// Body of a successful update. `value` is the value now stored under `name`
/// (the posted gauge, or the counter's new running total).
pub fn confirmation(name: &str, value: MetricValue) -> String {
    match value {
        MetricValue::Gauge(v) => {
            format!("Gauge metric '{name}' set to {} successfully.", gauge(v))
        }
        MetricValue::Counter(v) => {
            format!("Counter metric '{name}' updated to {} successfully.", counter(v))
        }
    }
}
