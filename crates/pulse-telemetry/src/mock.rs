//! Capturing emitter for tests that assert on exact emission.

use parking_lot::Mutex;

use crate::emitter::TelemetryEmitter;

#[derive(Clone, Debug, PartialEq)]
pub struct CounterCall {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub n: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistogramCall {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailCall {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

/// Records every emission in call order.
#[derive(Default)]
pub struct CapturingEmitter {
    counters: Mutex<Vec<CounterCall>>,
    histograms: Mutex<Vec<HistogramCall>>,
    details: Mutex<Vec<DetailCall>>,
}

impl CapturingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> Vec<CounterCall> {
        self.counters.lock().clone()
    }

    pub fn histograms(&self) -> Vec<HistogramCall> {
        self.histograms.lock().clone()
    }

    pub fn details(&self) -> Vec<DetailCall> {
        self.details.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.lock().is_empty()
            && self.histograms.lock().is_empty()
            && self.details.lock().is_empty()
    }
}

fn owned(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    labels
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl TelemetryEmitter for CapturingEmitter {
    fn counter(&self, name: &str, labels: &[(&str, &str)], n: u64) {
        self.counters.lock().push(CounterCall {
            name: name.to_string(),
            labels: owned(labels),
            n,
        });
    }

    fn histogram(&self, name: &str, labels: &[(&str, &str)], value: f64) {
        self.histograms.lock().push(HistogramCall {
            name: name.to_string(),
            labels: owned(labels),
            value,
        });
    }

    fn detail(&self, name: &str, attributes: Vec<(String, String)>) {
        self.details.lock().push(DetailCall {
            name: name.to_string(),
            attributes,
        });
    }
}
