// ============================================================================
// Order Flow - Wizard Navigation
// ============================================================================
//
// - Step (Start, Flavor, Pickup, Summary)
// - Controller (OrderFlow back stack, FlowEvent)
// - Errors (FlowError)
//
// Forward-only "next"; "cancel" resets the order and returns to Start.
//
// ============================================================================

pub mod controller;
pub mod errors;
pub mod step;

pub use controller::{FlowEvent, OrderFlow};
pub use errors::FlowError;
pub use step::Step;
