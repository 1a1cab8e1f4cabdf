//! Process memory sampling.
//!
//! The field list is fixed; values are read from `/proc/self/status` on Linux.
//! Fields reported in kB are converted to bytes. Platforms without procfs
//! produce an empty sample rather than an error.

/// Source of named gauge samples.
pub trait Sampler: Send + Sync {
    fn sample(&self) -> Vec<(String, f64)>;
}

/// `/proc/self/status` fields forwarded as gauges, in reporting order.
pub const MEMORY_FIELDS: [&str; 14] = [
    "VmPeak", "VmSize", "VmHWM", "VmRSS", "VmData", "VmStk", "VmExe", "VmLib", "VmPTE", "VmSwap",
    "RssAnon", "RssFile", "RssShmem", "Threads",
];

const STATUS_PATH: &str = "/proc/self/status";

#[derive(Debug, Default, Clone, Copy)]
pub struct MemorySampler;

impl MemorySampler {
    pub fn new() -> Self {
        Self
    }
}

impl Sampler for MemorySampler {
    fn sample(&self) -> Vec<(String, f64)> {
        match std::fs::read_to_string(STATUS_PATH) {
            Ok(status) => parse_status(&status),
            Err(e) => {
                tracing::debug!(path = STATUS_PATH, error = %e, "memory stats unavailable");
                Vec::new()
            }
        }
    }
}

/// Extract [`MEMORY_FIELDS`] from the text of a procfs status file.
pub fn parse_status(status: &str) -> Vec<(String, f64)> {
    MEMORY_FIELDS
        .iter()
        .filter_map(|&field| {
            let line = status
                .lines()
                .find(|l| l.split(':').next() == Some(field))?;
            let value = parse_value(line.split_once(':')?.1)?;
            Some((field.to_string(), value))
        })
        .collect()
}

fn parse_value(raw: &str) -> Option<f64> {
    let mut parts = raw.split_whitespace();
    let n: u64 = parts.next()?.parse().ok()?;
    let bytes = match parts.next() {
        Some("kB") => n.saturating_mul(1024),
        None => n,
        Some(_) => return None,
    };
    Some(bytes as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Name:\tmetricsd-agent\n\
        Umask:\t0022\n\
        State:\tS (sleeping)\n\
        VmPeak:\t   12000 kB\n\
        VmSize:\t   11000 kB\n\
        VmHWM:\t    4000 kB\n\
        VmRSS:\t    3500 kB\n\
        RssAnon:\t    1200 kB\n\
        VmData:\t    2048 kB\n\
        Threads:\t4\n\
        SigQ:\t0/63266\n";

    #[test]
    fn picks_known_fields_in_fixed_order() {
        let sample = parse_status(STATUS);
        let names: Vec<&str> = sample.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["VmPeak", "VmSize", "VmHWM", "VmRSS", "VmData", "RssAnon", "Threads"]);
    }

    #[test]
    fn converts_kb_to_bytes() {
        let sample = parse_status(STATUS);
        let rss = sample.iter().find(|(n, _)| n == "VmRSS").map(|(_, v)| *v);
        assert_eq!(rss, Some(3500.0 * 1024.0));
        let threads = sample.iter().find(|(n, _)| n == "Threads").map(|(_, v)| *v);
        assert_eq!(threads, Some(4.0));
    }

    #[test]
    fn ignores_garbage() {
        assert!(parse_status("VmRSS:\tlots kB\nVmSize:\t1 MB\n").is_empty());
        assert!(parse_status("").is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn samples_own_process() {
        let sample = MemorySampler::new().sample();
        assert!(sample.iter().any(|(n, v)| n == "VmRSS" && *v > 0.0));
    }
}
