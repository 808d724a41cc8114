use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::aggregator::MetricsAggregator;
use crate::store::SessionStore;

/// Five-field health view.
///
/// Each field is read independently from its owning component; concurrent
/// mutation between reads can yield a slightly inconsistent composite.
/// Consumers must tolerate that skew; there is no cross-component lock.
#[derive(Clone, Debug, Serialize)]
pub struct HealthSnapshot {
    pub uptime_seconds: u64,
    pub total_clicks: u64,
    pub page_views: u64,
    pub active_users: usize,
    pub total_sessions: u64,
}

/// Composes read-only snapshots from the store and the aggregator.
pub struct HealthReporter {
    started_at: Instant,
    store: Arc<SessionStore>,
    metrics: Arc<MetricsAggregator>,
}

impl HealthReporter {
    /// Captures the process start instant exactly once; construct at
    /// startup.
    pub fn new(store: Arc<SessionStore>, metrics: Arc<MetricsAggregator>) -> Self {
        Self {
            started_at: Instant::now(),
            store,
            metrics,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            uptime_seconds: self.started_at.elapsed().as_secs(),
            total_clicks: self.metrics.total_clicks(),
            page_views: self.metrics.total_page_views(),
            active_users: self.store.active_count(),
            total_sessions: self.metrics.total_sessions(),
        }
    }
}
