use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use pulse_core::{EventKind, IngestError, InteractionEvent};
use pulse_telemetry::{names, TelemetryEmitter};

use crate::aggregator::MetricsAggregator;
use crate::store::SessionStore;

/// Validates and classifies inbound events, folds them into session and
/// counter state, and emits labeled samples toward the telemetry boundary.
///
/// Emission is fire-and-forget: the emitter is assumed non-blocking and
/// its behavior can never fail `submit`.
pub struct EventIngestor {
    store: Arc<SessionStore>,
    metrics: Arc<MetricsAggregator>,
    emitter: Arc<dyn TelemetryEmitter>,
}

impl EventIngestor {
    pub fn new(
        store: Arc<SessionStore>,
        metrics: Arc<MetricsAggregator>,
        emitter: Arc<dyn TelemetryEmitter>,
    ) -> Self {
        Self {
            store,
            metrics,
            emitter,
        }
    }

    /// Ingest one event. Runs synchronously to completion; the only
    /// failure is a missing `event_type`, which discards the event with
    /// no state change.
    #[instrument(
        skip_all,
        fields(event_type = %event.event_type, session_id = %event.session_id)
    )]
    pub fn submit(&self, mut event: InteractionEvent) -> Result<(), IngestError> {
        let Some(kind) = event.kind() else {
            return Err(IngestError::MissingEventType);
        };

        if event.timestamp.is_none() {
            event.timestamp = Some(Utc::now());
        }

        if self.store.upsert(&event) {
            self.metrics.record_session_created();
        }

        match kind {
            EventKind::Click => self.record_click(&event),
            EventKind::MouseMove => self.record_cursor(&event, "mousemove"),
            EventKind::Scroll => self.record_scroll(&event),
            EventKind::Custom => self.record_custom(&event),
            EventKind::Other => {
                warn!(event_type = %event.event_type, "unrecognized event type");
            }
        }

        debug!(element_id = %event.element_id, "event processed");
        Ok(())
    }

    fn record_click(&self, event: &InteractionEvent) {
        self.metrics.record_click();

        self.emitter.counter(
            names::CLICKS_TOTAL,
            &[
                ("element_id", event.element_id.as_str()),
                ("element_type", event.element_type.as_str()),
                ("page_url", event.page_url.as_str()),
            ],
            1,
        );

        self.record_cursor(event, "click");

        self.emitter.detail(
            names::CLICK_DETAIL,
            vec![
                ("element_id".into(), event.element_id.clone()),
                ("element_type".into(), event.element_type.clone()),
                ("element_text".into(), event.element_text.clone()),
                ("viewport_x".into(), event.viewport_x.to_string()),
                ("viewport_y".into(), event.viewport_y.to_string()),
            ],
        );
    }

    fn record_cursor(&self, event: &InteractionEvent, event_type: &str) {
        self.emitter.histogram(
            names::CURSOR_POSITION,
            &[("coordinate", "x"), ("event_type", event_type)],
            f64::from(event.cursor_x),
        );
        self.emitter.histogram(
            names::CURSOR_POSITION,
            &[("coordinate", "y"), ("event_type", event_type)],
            f64::from(event.cursor_y),
        );
    }

    fn record_scroll(&self, event: &InteractionEvent) {
        self.emitter.histogram(
            names::CURSOR_POSITION,
            &[("coordinate", "scroll_x"), ("event_type", "scroll")],
            f64::from(event.scroll_x),
        );
        self.emitter.histogram(
            names::CURSOR_POSITION,
            &[("coordinate", "scroll_y"), ("event_type", "scroll")],
            f64::from(event.scroll_y),
        );
    }

    fn record_custom(&self, event: &InteractionEvent) {
        let mut attributes: Vec<(String, String)> = vec![
            ("element_id".into(), event.element_id.clone()),
            ("session_id".into(), event.session_id.to_string()),
        ];
        for (key, value) in &event.custom {
            if let Some(rendered) = value.render() {
                attributes.push((key.clone(), rendered));
            }
        }
        self.emitter.detail(names::CUSTOM_EVENT, attributes);
    }
}
