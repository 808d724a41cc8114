/// Validation failures surfaced to the ingestion caller.
///
/// This is the only error category inside the core: the event is
/// discarded, no state is mutated, and nothing is emitted. Unknown but
/// non-empty event types are not errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("event_type is required")]
    MissingEventType,
}
