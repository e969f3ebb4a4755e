// ============================================================================
// Cupcake App - Presentation Layer Facade
// ============================================================================
//
// - Session (CupcakeApp, ScreenModel, screen callbacks)
// - Share (OrderSharer, hand-off of the finished order)
//
// ============================================================================

pub mod session;
pub mod share;

pub use session::{CupcakeApp, ScreenModel, SendOrderError, StepOptions};
pub use share::{OrderShare, OrderSharer, ShareError, TracingSharer};
