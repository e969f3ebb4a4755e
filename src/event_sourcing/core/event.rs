use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use anyhow::Result;

// ============================================================================
// Event Envelope - Log Metadata Around A Domain Event
// ============================================================================
//
// Every event appended to the log is wrapped with its position in the
// stream, its type name and the order attempt it belongs to.
// Generic over the event payload.
//
// ============================================================================

/// Event envelope - wraps a domain event with log metadata
///
/// Type Parameter:
/// - `E`: The domain event payload
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventEnvelope<E> {
    pub event_id: Uuid,
    pub aggregate_id: Uuid,
    pub sequence_number: i64,

    pub event_type: String,
    pub event_version: i32,

    pub event_data: E,

    /// Groups the events of one order attempt; changes on every reset
    pub correlation_id: Uuid,

    pub timestamp: DateTime<Utc>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(
        aggregate_id: Uuid,
        sequence_number: i64,
        event_data: E,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            aggregate_id,
            sequence_number,
            event_type: event_data.event_type().to_string(),
            event_version: event_data.event_version(),
            event_data,
            correlation_id,
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Implemented by every event payload that can be written to the log.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Name of the concrete event, e.g. `"QuantitySelected"`
    fn event_type(&self) -> &'static str;

    fn event_version(&self) -> i32 {
        1
    }
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

// ============================================================================
// Tests
// ============================================================================
