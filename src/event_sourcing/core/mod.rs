// ============================================================================
// Event Sourcing Core - Generic Abstractions
// ============================================================================
//
// No order-specific code lives here; everything is generic over the
// aggregate and its event type.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope, serialize_event};
