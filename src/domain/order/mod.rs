// ============================================================================
// Order Domain - Cupcake Order State
// ============================================================================
//
// - Value objects (Money, PriceSchedule, OrderRules)
// - Pickup calendar (Clock, PickupCalendar)
// - Events (OrderStarted, QuantitySelected, ...)
// - Commands (Begin, SetQuantity, SetFlavor, SetPickupDate)
// - Errors (OrderError)
// - Aggregate (OrderAggregate, OrderState snapshot)
// - Store (OrderStore, the single writer)
//
// ============================================================================

pub mod value_objects;
pub mod pickup;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod store;

pub use value_objects::*;
pub use pickup::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use store::*;
