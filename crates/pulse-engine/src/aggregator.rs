use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Process-wide monotonic counters and derived rates.
///
/// Counters are lock-free and readable without blocking writers; they are
/// never decremented and reset only with the process. They are never
/// combined with the session lock; cross-component reads are best-effort.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    clicks: AtomicU64,
    page_views: AtomicU64,
    sessions_created: AtomicU64,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_click(&self) {
        self.clicks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page_view(&self) {
        self.page_views.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_created(&self) {
        self.sessions_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_clicks(&self) -> u64 {
        self.clicks.load(Ordering::Relaxed)
    }

    pub fn total_page_views(&self) -> u64 {
        self.page_views.load(Ordering::Relaxed)
    }

    pub fn total_sessions(&self) -> u64 {
        self.sessions_created.load(Ordering::Relaxed)
    }

    /// Clicks per minute over the given window. A zero window yields 0.0
    /// rather than an error.
    pub fn click_rate(&self, window: Duration) -> f64 {
        let minutes = window.as_secs_f64() / 60.0;
        if minutes == 0.0 {
            return 0.0;
        }
        self.total_clicks() as f64 / minutes
    }
}
