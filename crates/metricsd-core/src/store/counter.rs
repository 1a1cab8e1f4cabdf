use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use super::lock;

/// Counter store: every `add` accumulates into the running total.
#[derive(Debug, Default)]
pub struct CounterStore {
    map: Mutex<HashMap<String, i64>>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to `name` (absent names start at zero) and return the new
    /// total. Read and write happen under one lock acquisition, so concurrent
    /// adds to the same name never lose an increment.
    ///
    /// Overflow wraps around in two's complement.
    pub fn add(&self, name: &str, delta: i64) -> i64 {
        let mut map = lock(&self.map);
        let slot = map.entry(name.to_string()).or_insert(0);
        let (total, overflowed) = slot.overflowing_add(delta);
        if overflowed {
            tracing::warn!(metric = %name, current = *slot, delta, "counter overflow wrapped");
        }
        *slot = total;
        total
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        lock(&self.map).get(name).copied()
    }

    pub fn len(&self) -> usize {
        lock(&self.map).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.map).is_empty()
    }

    pub(crate) fn snapshot(&self) -> BTreeMap<String, i64> {
        lock(&self.map).iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}
