// ============================================================================
// Event Sourcing Store
// ============================================================================
//
// Generic append-only storage, usable with any event type.
//
// ============================================================================

pub mod event_store;

pub use event_store::{EventStore, EventStoreError};
