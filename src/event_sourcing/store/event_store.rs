use std::collections::HashMap;
use uuid::Uuid;

use crate::event_sourcing::core::{DomainEvent, EventEnvelope, serialize_event};

// ============================================================================
// Event Store - Append-Only Log Of Envelopes
// ============================================================================
//
// In-memory and process-local: streams live as long as the store does.
//
// Type Parameter:
// - `E`: The domain event type
//
// Responsibilities:
// 1. Append events to a stream (append-only)
// 2. Load the event history of a stream
// 3. Reject appends written against a stale version
// 4. Drop streams that are no longer needed
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventStoreError {
    #[error("Cannot append empty event list")]
    EmptyAppend,

    #[error("Concurrency conflict: expected version {expected}, but current is {actual}")]
    ConcurrencyConflict { expected: i64, actual: i64 },

    #[error("Envelope for aggregate {found} appended to stream {stream}")]
    ForeignEvent { stream: Uuid, found: Uuid },
}

pub struct EventStore<E: DomainEvent> {
    aggregate_type_name: String, // e.g., "CupcakeOrder"
    streams: HashMap<Uuid, Vec<EventEnvelope<E>>>,
}

impl<E: DomainEvent> EventStore<E> {
    pub fn new(aggregate_type_name: &str) -> Self {
        Self {
            aggregate_type_name: aggregate_type_name.to_string(),
            streams: HashMap::new(),
        }
    }

    /// Append events to a stream
    /// Returns the new version number after appending
    pub fn append_events(
        &mut self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<i64, EventStoreError> {
        if events.is_empty() {
            return Err(EventStoreError::EmptyAppend);
        }

        let current_version = self.current_version(aggregate_id);
        if current_version != expected_version {
            return Err(EventStoreError::ConcurrencyConflict {
                expected: expected_version,
                actual: current_version,
            });
        }

        if let Some(foreign) = events.iter().find(|e| e.aggregate_id != aggregate_id) {
            return Err(EventStoreError::ForeignEvent {
                stream: aggregate_id,
                found: foreign.aggregate_id,
            });
        }

        let event_count = events.len();
        let stream = self.streams.entry(aggregate_id).or_default();

        // Sequence numbers are owned by the store, not the caller
        let mut new_version = expected_version;
        for mut envelope in events {
            new_version += 1;
            envelope.sequence_number = new_version;
            stream.push(envelope);
        }

        tracing::trace!(
            aggregate_id = %aggregate_id,
            aggregate_type = %self.aggregate_type_name,
            new_version = new_version,
            event_count = event_count,
            "Appended events to event store"
        );

        Ok(new_version)
    }

    /// All events of a stream in sequence order
    pub fn load_events(&self, aggregate_id: Uuid) -> &[EventEnvelope<E>] {
        self.streams
            .get(&aggregate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sequence number of the last event in the stream, 0 for a new stream
    pub fn current_version(&self, aggregate_id: Uuid) -> i64 {
        self.load_events(aggregate_id)
            .last()
            .map(|e| e.sequence_number)
            .unwrap_or(0)
    }

    /// Forget a stream entirely; returns how many events it held
    pub fn remove_stream(&mut self, aggregate_id: Uuid) -> usize {
        let removed = self
            .streams
            .remove(&aggregate_id)
            .map(|stream| stream.len())
            .unwrap_or(0);

        tracing::trace!(
            aggregate_id = %aggregate_id,
            aggregate_type = %self.aggregate_type_name,
            removed = removed,
            "Removed stream from event store"
        );
        removed
    }

    /// Stream history as a JSON array, for audit output
    pub fn export_json(&self, aggregate_id: Uuid) -> anyhow::Result<String> {
        serialize_event(&self.load_events(aggregate_id))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
