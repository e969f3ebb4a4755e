use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_sourcing::core::DomainEvent;

// ============================================================================
// Order Events - Facts Recorded By The Order Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Started(OrderStarted),
    QuantitySelected(QuantitySelected),
    FlavorSelected(FlavorSelected),
    PickupDateSelected(PickupDateSelected),
    Reset(OrderReset),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Started(_) => "OrderStarted",
            OrderEvent::QuantitySelected(_) => "QuantitySelected",
            OrderEvent::FlavorSelected(_) => "FlavorSelected",
            OrderEvent::PickupDateSelected(_) => "PickupDateSelected",
            OrderEvent::Reset(_) => "OrderReset",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// First event of a stream; pickup options generated at store creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStarted {
    pub pickup_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySelected {
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorSelected {
    pub flavor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDateSelected {
    pub pickup_date: String,
}

/// First event of a stream that replaces a cancelled order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReset {
    pub previous_order_id: Uuid,
    pub pickup_options: Vec<String>,
}
