use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::emitter::TelemetryEmitter;

/// In-memory counter. Monotonically increasing.
struct Counter {
    value: AtomicU64,
}

impl Counter {
    fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }
    fn increment(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }
    fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// In-memory histogram. Stores all observations for percentile computation.
struct Histogram {
    observations: Mutex<Vec<f64>>,
}

impl Histogram {
    fn new() -> Self {
        Self {
            observations: Mutex::new(Vec::new()),
        }
    }
    fn observe(&self, value: f64) {
        self.observations.lock().push(value);
    }
    fn summary(&self) -> HistogramSummary {
        let mut obs = self.observations.lock();
        if obs.is_empty() {
            return HistogramSummary::default();
        }
        obs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let count = obs.len();
        let sum: f64 = obs.iter().sum();
        let p50 = obs[count / 2];
        let p95 = obs[((count as f64 * 0.95) as usize).min(count - 1)];
        let p99 = obs[((count as f64 * 0.99) as usize).min(count - 1)];
        HistogramSummary {
            count: count as u64,
            sum,
            p50,
            p95,
            p99,
        }
    }
}

/// Summary statistics from a histogram.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub count: u64,
    pub sum: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Metric key: name + labels, label order independent.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct MetricKey {
    name: String,
    labels: Vec<(String, String)>,
}

impl MetricKey {
    fn new(name: impl Into<String>, labels: &[(&str, &str)]) -> Self {
        let mut sorted: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            name: name.into(),
            labels: sorted,
        }
    }
}

/// One counter's current value, for the metrics dump.
#[derive(Clone, Debug, Serialize)]
pub struct CounterSample {
    pub name: String,
    pub labels: HashMap<String, String>,
    pub value: u64,
}

/// One histogram's current summary, for the metrics dump.
#[derive(Clone, Debug, Serialize)]
pub struct HistogramSample {
    pub name: String,
    pub labels: HashMap<String, String>,
    pub summary: HistogramSummary,
}

/// Point-in-time view of every metric the recorder holds.
#[derive(Clone, Debug, Serialize)]
pub struct MetricsDump {
    pub counters: Vec<CounterSample>,
    pub histograms: Vec<HistogramSample>,
}

/// Thread-safe in-memory metrics recorder keyed by name + sorted labels.
///
/// Doubles as the default [`TelemetryEmitter`]: emission lands here and is
/// queryable for dashboards and tests. Nothing is persisted; all values
/// reset with the process.
#[derive(Default)]
pub struct MetricsRecorder {
    counters: RwLock<HashMap<MetricKey, Counter>>,
    histograms: RwLock<HashMap<MetricKey, Histogram>>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a counter by n.
    pub fn counter_inc(&self, name: &str, labels: &[(&str, &str)], n: u64) {
        let key = MetricKey::new(name, labels);
        let counters = self.counters.read();
        if let Some(c) = counters.get(&key) {
            c.increment(n);
            return;
        }
        drop(counters);
        let mut counters = self.counters.write();
        let c = counters.entry(key).or_insert_with(Counter::new);
        c.increment(n);
    }

    /// Record a histogram observation.
    pub fn histogram_observe(&self, name: &str, labels: &[(&str, &str)], value: f64) {
        let key = MetricKey::new(name, labels);
        let histograms = self.histograms.read();
        if let Some(h) = histograms.get(&key) {
            h.observe(value);
            return;
        }
        drop(histograms);
        let mut histograms = self.histograms.write();
        let h = histograms.entry(key).or_insert_with(Histogram::new);
        h.observe(value);
    }

    /// Get current value of a counter. Zero if never incremented.
    pub fn counter_get(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
        let key = MetricKey::new(name, labels);
        self.counters.read().get(&key).map_or(0, |c| c.get())
    }

    /// Get a histogram summary. All-zero if never observed.
    pub fn histogram_summary(&self, name: &str, labels: &[(&str, &str)]) -> HistogramSummary {
        let key = MetricKey::new(name, labels);
        self.histograms
            .read()
            .get(&key)
            .map(|h| h.summary())
            .unwrap_or_default()
    }

    /// Snapshot every metric, sorted by name then labels.
    pub fn dump(&self) -> MetricsDump {
        let counters = self.counters.read();
        let mut counter_samples: Vec<CounterSample> = counters
            .iter()
            .map(|(key, counter)| CounterSample {
                name: key.name.clone(),
                labels: key.labels.iter().cloned().collect(),
                value: counter.get(),
            })
            .collect();
        drop(counters);

        let histograms = self.histograms.read();
        let mut histogram_samples: Vec<HistogramSample> = histograms
            .iter()
            .map(|(key, histogram)| HistogramSample {
                name: key.name.clone(),
                labels: key.labels.iter().cloned().collect(),
                summary: histogram.summary(),
            })
            .collect();
        drop(histograms);

        counter_samples.sort_by(|a, b| a.name.cmp(&b.name));
        histogram_samples.sort_by(|a, b| a.name.cmp(&b.name));

        MetricsDump {
            counters: counter_samples,
            histograms: histogram_samples,
        }
    }
}

impl TelemetryEmitter for MetricsRecorder {
    fn counter(&self, name: &str, labels: &[(&str, &str)], n: u64) {
        self.counter_inc(name, labels, n);
    }

    fn histogram(&self, name: &str, labels: &[(&str, &str)], value: f64) {
        self.histogram_observe(name, labels, value);
    }

    fn detail(&self, name: &str, attributes: Vec<(String, String)>) {
        // Details are per-occurrence records; keep a total and log the rest.
        self.counter_inc(name, &[], 1);
        tracing::debug!(name, ?attributes, "detail record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_basic() {
        let recorder = MetricsRecorder::new();
        recorder.counter_inc("requests_total", &[("method", "GET")], 1);
        recorder.counter_inc("requests_total", &[("method", "GET")], 1);
        recorder.counter_inc("requests_total", &[("method", "POST")], 1);

        assert_eq!(recorder.counter_get("requests_total", &[("method", "GET")]), 2);
        assert_eq!(recorder.counter_get("requests_total", &[("method", "POST")]), 1);
        assert_eq!(recorder.counter_get("requests_total", &[("method", "PUT")]), 0);
    }

    #[test]
    fn histogram_observations() {
        let recorder = MetricsRecorder::new();
        let labels = &[("coordinate", "x")];

        for v in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0] {
            recorder.histogram_observe("cursor_position", labels, v);
        }

        let summary = recorder.histogram_summary("cursor_position", labels);
        assert_eq!(summary.count, 10);
        assert_eq!(summary.sum, 550.0);
        assert!(summary.p50 >= 50.0 && summary.p50 <= 60.0);
        assert!(summary.p95 >= 90.0);
    }

    #[test]
    fn histogram_empty() {
        let recorder = MetricsRecorder::new();
        let summary = recorder.histogram_summary("nonexistent", &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.sum, 0.0);
    }

    #[test]
    fn label_ordering_independent() {
        let recorder = MetricsRecorder::new();
        recorder.counter_inc("test", &[("a", "1"), ("b", "2")], 1);
        recorder.counter_inc("test", &[("b", "2"), ("a", "1")], 1);

        assert_eq!(recorder.counter_get("test", &[("a", "1"), ("b", "2")]), 2);
        assert_eq!(recorder.counter_get("test", &[("b", "2"), ("a", "1")]), 2);
    }

    #[test]
    fn detail_counts_occurrences() {
        let recorder = MetricsRecorder::new();
        recorder.detail("custom_event", vec![("k".into(), "v".into())]);
        recorder.detail("custom_event", vec![]);
        assert_eq!(recorder.counter_get("custom_event", &[]), 2);
    }

    #[test]
    fn dump_is_sorted_and_complete() {
        let recorder = MetricsRecorder::new();
        recorder.counter_inc("zeta_total", &[], 3);
        recorder.counter_inc("alpha_total", &[("k", "v")], 1);
        recorder.histogram_observe("cursor_position", &[("coordinate", "x")], 42.0);

        let dump = recorder.dump();
        assert_eq!(dump.counters.len(), 2);
        assert_eq!(dump.counters[0].name, "alpha_total");
        assert_eq!(dump.counters[0].labels["k"], "v");
        assert_eq!(dump.counters[1].value, 3);
        assert_eq!(dump.histograms.len(), 1);
        assert_eq!(dump.histograms[0].summary.count, 1);
    }

    #[test]
    fn concurrent_counter_increments() {
        use std::sync::Arc;
        use std::thread;

        let recorder = Arc::new(MetricsRecorder::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let r = recorder.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    r.counter_inc("concurrent_test", &[], 1);
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(recorder.counter_get("concurrent_test", &[]), 10_000);
    }
}
