use uuid::Uuid;
use anyhow::Result;
use super::event::EventEnvelope;

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// 1. Commands are checked against current state and turned into events
// 2. Events are facts; applying them never fails
// 3. Current state is the fold of every event in the stream
//
// ============================================================================

/// Generic aggregate trait
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for rejected commands
pub trait Aggregate: Sized {
    type Event;
    type Command;
    type Error;

    /// Fold one event into the state
    fn apply_event(&mut self, event: &Self::Event);

    /// Decide which events a command produces (business logic)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    fn aggregate_id(&self) -> Uuid;

    /// Sequence number of the last applied event
    fn version(&self) -> i64;

    /// Record the sequence number of the last applied event
    fn set_version(&mut self, version: i64);

    /// Rebuild state by folding an event history into `self`
    ///
    /// `self` is expected to be a blank aggregate; envelopes must belong to
    /// this aggregate and be in sequence order.
    fn replay(mut self, events: &[EventEnvelope<Self::Event>]) -> Result<Self> {
        for envelope in events {
            if envelope.aggregate_id != self.aggregate_id() {
                anyhow::bail!(
                    "Event {} belongs to aggregate {}, not {}",
                    envelope.event_id,
                    envelope.aggregate_id,
                    self.aggregate_id()
                );
            }
            if envelope.sequence_number != self.version() + 1 {
                anyhow::bail!(
                    "Out of order event: expected sequence {}, got {}",
                    self.version() + 1,
                    envelope.sequence_number
                );
            }

            self.apply_event(&envelope.event_data);
            self.set_version(envelope.sequence_number);
        }

        Ok(self)
    }
}
