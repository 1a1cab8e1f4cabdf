use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use super::lock;

/// Gauge store: every `set` replaces the previous value.
#[derive(Debug, Default)]
pub struct GaugeStore {
    map: Mutex<HashMap<String, f64>>,
}

impl GaugeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, value: f64) {
        lock(&self.map).insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        lock(&self.map).get(name).copied()
    }

    pub fn len(&self) -> usize {
        lock(&self.map).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.map).is_empty()
    }

    pub(crate) fn snapshot(&self) -> BTreeMap<String, f64> {
        lock(&self.map).iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}
