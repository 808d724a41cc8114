pub mod error;
pub mod events;
pub mod ids;

pub use error::IngestError;
pub use events::{CustomValue, EventKind, InteractionEvent};
pub use ids::SessionId;
