//! Metric name constants shared across crates to avoid typos.

/// Clicks recorded (counter, labels: `element_id`, `element_type`, `page_url`).
pub const CLICKS_TOTAL: &str = "clicks_total";
/// Page views recorded (counter).
pub const PAGE_VIEWS_TOTAL: &str = "page_views_total";
/// Sessions ever created (counter).
pub const SESSIONS_TOTAL: &str = "sessions_total";
/// HTTP requests processed (counter, labels: method, path, status).
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// Cursor and scroll coordinates (histogram, labels: coordinate, `event_type`).
pub const CURSOR_POSITION: &str = "cursor_position";
/// HTTP request duration in seconds (histogram, labels: method, path, status).
pub const REQUEST_DURATION_SECONDS: &str = "request_duration_seconds";
/// Per-click analytics detail record.
pub const CLICK_DETAIL: &str = "click_detail";
/// Custom event detail record.
pub const CUSTOM_EVENT: &str = "custom_event";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_are_snake_case() {
        let names = [
            CLICKS_TOTAL,
            PAGE_VIEWS_TOTAL,
            SESSIONS_TOTAL,
            HTTP_REQUESTS_TOTAL,
            CURSOR_POSITION,
            REQUEST_DURATION_SECONDS,
            CLICK_DETAIL,
            CUSTOM_EVENT,
        ];
        for name in names {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "metric name '{name}' must be snake_case"
            );
        }
    }
}
