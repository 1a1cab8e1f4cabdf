//! Minimal metrics registry for the collector itself.
//!
//! Counter/gauge/histogram vectors with dynamic labels backed by `DashMap`.
//! Label sets are flattened into sorted key vectors so rendering order is
//! stable per series. Histogram buckets are fixed in microseconds to avoid
//! floating point math.

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{}}} {val}", label_str(r.key()));
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn dec(&self, labels: &[(&str, &str)]) {
        self.add(labels, -1);
    }

    fn add(&self, labels: &[(&str, &str)], v: i64) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0))
            .fetch_add(v, Ordering::Relaxed);
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} gauge");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{}}} {val}", label_str(r.key()));
        }
    }
}

// 50us .. 1s
const BUCKETS_MICROS: [u64; 8] = [50, 100, 250, 500, 1_000, 5_000, 50_000, 1_000_000];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration; buckets are cumulative.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for r in self.map.iter() {
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };
            let hist = r.value();

            for (bucket, le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
                let n = bucket.load(Ordering::Relaxed);
                let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {n}");
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");
            let _ = writeln!(out, "{name}_sum{{{labels}}} {}", hist.sum.load(Ordering::Relaxed));
            let _ = writeln!(out, "{name}_count{{{labels}}} {count}");
        }
    }
}

#[derive(Default)]
pub struct ServerMetrics {
    pub http_requests: CounterVec,
    pub http_inflight: GaugeVec,
    pub http_duration: HistogramVec, // microseconds
    pub updates: CounterVec,
    pub rejections: CounterVec,
    draining: AtomicBool,
}

impl ServerMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render every series plus caller-provided `name value` lines.
    pub fn render(&self, extra: &[(String, u64)]) -> String {
        let mut out = String::new();
        self.http_requests.render("metricsd_http_requests_total", &mut out);
        self.http_inflight.render("metricsd_http_requests_inflight", &mut out);
        self.http_duration.render("metricsd_http_request_duration_micros", &mut out);
        self.updates.render("metricsd_updates_total", &mut out);
        self.rejections.render("metricsd_rejections_total", &mut out);

        let _ = writeln!(
            out,
            "# TYPE metricsd_draining gauge\nmetricsd_draining {}",
            u8::from(self.is_draining())
        );
        for (k, v) in extra {
            let _ = writeln!(out, "{k} {v}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_split_series() {
        let c = CounterVec::default();
        c.inc(&[("route", "/"), ("status", "200")]);
        c.inc(&[("status", "200"), ("route", "/")]);

        let mut out = String::new();
        c.render("hits", &mut out);
        assert_eq!(out, "# TYPE hits counter\nhits{route=\"/\",status=\"200\"} 2\n");
    }

    #[test]
    fn histogram_buckets_are_cumulative() {
        let h = HistogramVec::default();
        h.observe(&[("route", "/x")], Duration::from_micros(80));
        h.observe(&[("route", "/x")], Duration::from_secs(2));

        let mut out = String::new();
        h.render("lat", &mut out);
        assert!(out.contains("lat_bucket{route=\"/x\",le=\"50\"} 0"));
        assert!(out.contains("lat_bucket{route=\"/x\",le=\"100\"} 1"));
        assert!(out.contains("lat_bucket{route=\"/x\",le=\"1000000\"} 1"));
        assert!(out.contains("lat_bucket{route=\"/x\",le=\"+Inf\"} 2"));
        assert!(out.contains("lat_count{route=\"/x\"} 2"));
    }

    #[test]
    fn render_includes_extra_and_draining() {
        let m = ServerMetrics::default();
        m.updates.inc(&[("kind", "gauge")]);
        m.http_inflight.inc(&[("route", "/")]);
        m.http_inflight.dec(&[("route", "/")]);
        m.set_draining();

        let out = m.render(&[("metricsd_stored_series{kind=\"gauge\"}".to_string(), 3)]);
        assert!(out.contains("metricsd_updates_total{kind=\"gauge\"} 1"));
        assert!(out.contains("metricsd_http_requests_inflight{route=\"/\"} 0"));
        assert!(out.contains("metricsd_draining 1"));
        assert!(out.contains("metricsd_stored_series{kind=\"gauge\"} 3"));
    }
}
