//! In-memory metric stores.
//!
//! One store per kind, each a `name -> value` map behind its own mutex, so
//! gauge and counter traffic never contend and the two namespaces stay
//! independent. Locks are held for a single map access only, never across I/O.

mod counter;
mod gauge;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::protocol::{MetricKind, MetricValue, Update};

pub use counter::CounterStore;
pub use gauge::GaugeStore;

/// Recover the map even if a holder panicked; every critical section is a
/// single map operation, so the map is never left half-updated.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-wide storage: both kinds side by side.
#[derive(Debug, Default)]
pub struct Storage {
    pub gauges: GaugeStore,
    pub counters: CounterStore,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one update according to its kind and return the value now
    /// stored under its name.
    pub fn apply(&self, update: &Update) -> MetricValue {
        match update.value {
            MetricValue::Gauge(v) => {
                self.gauges.set(&update.name, v);
                MetricValue::Gauge(v)
            }
            MetricValue::Counter(delta) => MetricValue::Counter(self.counters.add(&update.name, delta)),
        }
    }

    pub fn get(&self, kind: MetricKind, name: &str) -> Option<MetricValue> {
        match kind {
            MetricKind::Gauge => self.gauges.get(name).map(MetricValue::Gauge),
            MetricKind::Counter => self.counters.get(name).map(MetricValue::Counter),
        }
    }

    pub fn len(&self, kind: MetricKind) -> usize {
        match kind {
            MetricKind::Gauge => self.gauges.len(),
            MetricKind::Counter => self.counters.len(),
        }
    }

    /// Copy of every stored metric. Each store is read under its own lock, so
    /// the two halves are not taken at the same instant.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            gauges: self.gauges.snapshot(),
            counters: self.counters.snapshot(),
        }
    }
}

/// Sorted view of all metrics, serialized by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub gauges: BTreeMap<String, f64>,
    pub counters: BTreeMap<String, i64>,
}
