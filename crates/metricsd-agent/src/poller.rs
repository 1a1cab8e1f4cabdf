//! Agent polling loop.
//!
//! Each cycle sends every sampled gauge, one `RandomValue` gauge and a
//! `PollCount` counter delta of 1, so the collector's `PollCount` equals the
//! number of completed cycles. Failed sends are logged and skipped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use metricsd_core::Update;

use crate::reporter::Reporter;
use crate::sampler::Sampler;

pub const RANDOM_VALUE: &str = "RandomValue";
pub const POLL_COUNT: &str = "PollCount";

/// Outcome of one reporting cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct Poller {
    reporter: Arc<dyn Reporter>,
    sampler: Box<dyn Sampler>,
    polls: u64,
}

impl Poller {
    pub fn new(reporter: Arc<dyn Reporter>, sampler: Box<dyn Sampler>) -> Self {
        Self {
            reporter,
            sampler,
            polls: 0,
        }
    }

    /// Cycles started so far.
    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Updates for the next cycle, in send order.
    pub fn collect(&mut self) -> Vec<Update> {
        self.polls += 1;
        let mut updates: Vec<Update> = self
            .sampler
            .sample()
            .into_iter()
            .map(|(name, value)| Update::gauge(name, value))
            .collect();
        updates.push(Update::gauge(RANDOM_VALUE, rand::random::<f64>()));
        updates.push(Update::counter(POLL_COUNT, 1));
        updates
    }

    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();
        for update in self.collect() {
            match self.reporter.report(&update).await {
                Ok(body) => {
                    report.sent += 1;
                    tracing::debug!(metric = %update.name, kind = %update.kind(), response = %body, "update sent");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(metric = %update.name, error = %e, "update failed");
                }
            }
        }
        report
    }

    /// Run cycles every `every` until `shutdown` resolves. The first cycle
    /// starts immediately.
    pub async fn run<F>(mut self, every: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tick.tick() => {
                    let report = self.run_cycle().await;
                    tracing::info!(poll = self.polls, sent = report.sent, failed = report.failed, "cycle done");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use metricsd_core::error::{MetricsError, Result};
    use metricsd_core::MetricValue;

    use super::*;

    struct FixedSampler;

    impl Sampler for FixedSampler {
        fn sample(&self) -> Vec<(String, f64)> {
            vec![("VmRSS".into(), 4096.0), ("Threads".into(), 3.0)]
        }
    }

    /// Records every update; refuses names listed in `refuse`.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Update>>,
        refuse: Vec<&'static str>,
    }

    #[async_trait]
    impl Reporter for Recorder {
        async fn report(&self, update: &Update) -> Result<String> {
            if self.refuse.contains(&update.name.as_str()) {
                return Err(MetricsError::Transport("refused".into()));
            }
            self.seen
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(update.clone());
            Ok("ok".into())
        }
    }

    #[test]
    fn collect_orders_samples_random_then_counter() {
        let mut p = Poller::new(Arc::new(Recorder::default()), Box::new(FixedSampler));
        let updates = p.collect();

        let names: Vec<&str> = updates.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["VmRSS", "Threads", RANDOM_VALUE, POLL_COUNT]);
        assert_eq!(updates[0].value, MetricValue::Gauge(4096.0));
        assert!(matches!(updates[2].value, MetricValue::Gauge(v) if (0.0..1.0).contains(&v)));
        assert_eq!(updates[3].value, MetricValue::Counter(1));
        assert_eq!(p.polls(), 1);
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_cycle() {
        let recorder = Arc::new(Recorder {
            refuse: vec!["Threads"],
            ..Recorder::default()
        });
        let mut p = Poller::new(recorder.clone(), Box::new(FixedSampler));

        let report = p.run_cycle().await;
        assert_eq!(report, CycleReport { sent: 3, failed: 1 });

        let seen = recorder.seen.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let names: Vec<&str> = seen.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["VmRSS", RANDOM_VALUE, POLL_COUNT]);
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_on_shutdown() {
        let recorder = Arc::new(Recorder::default());
        let p = Poller::new(recorder.clone(), Box::new(FixedSampler));

        p.run(
            Duration::from_secs(5),
            tokio::time::sleep(Duration::from_secs(12)),
        )
        .await;

        // ticks at 0s, 5s, 10s
        let seen = recorder.seen.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let polls = seen.iter().filter(|u| u.name == POLL_COUNT).count();
        assert_eq!(polls, 3);
    }
}
