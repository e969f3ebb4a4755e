use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_sourcing::core::Aggregate;
use super::value_objects::{Money, OrderRules, PriceSchedule, SelectionPolicy};
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;

// ============================================================================
// Order State - Published Snapshot
// ============================================================================

/// Snapshot of the in-progress order, as read by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    /// 0 until a quantity is chosen
    pub quantity: u32,
    pub flavor: String,
    pub pickup_date: String,
    /// Currency text, e.g. `"$12.00"`
    pub price: String,
    /// `price` in minor units
    pub subtotal: Money,
    pub pickup_options: Vec<String>,
}

impl OrderState {
    /// Empty selections with the given pickup options
    pub fn fresh(pickup_options: Vec<String>, prices: &PriceSchedule) -> Self {
        Self {
            quantity: 0,
            flavor: String::new(),
            pickup_date: String::new(),
            price: prices.format(Money::ZERO),
            subtotal: Money::ZERO,
            pickup_options,
        }
    }

    /// True when the earliest offered date is selected
    pub fn is_same_day_pickup(&self) -> bool {
        self.pickup_options
            .first()
            .is_some_and(|today| *today == self.pickup_date)
    }

    fn reprice(&mut self, prices: &PriceSchedule) {
        self.subtotal = prices.calculate(self.quantity, &self.pickup_date, &self.pickup_options);
        self.price = prices.format(self.subtotal);
    }
}

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone)]
pub struct OrderAggregate {
    id: Uuid,
    version: i64,
    state: OrderState,
    rules: OrderRules,
}

impl OrderAggregate {
    /// Aggregate with no events applied yet
    pub fn blank(id: Uuid, rules: OrderRules) -> Self {
        let state = OrderState::fresh(Vec::new(), &rules.prices);
        Self {
            id,
            version: 0,
            state,
            rules,
        }
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn rules(&self) -> &OrderRules {
        &self.rules
    }

    fn strict(&self) -> bool {
        self.rules.policy == SelectionPolicy::Strict
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderAggregate {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_event(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::Started(OrderStarted { pickup_options })
            | OrderEvent::Reset(OrderReset { pickup_options, .. }) => {
                self.state = OrderState::fresh(pickup_options.clone(), &self.rules.prices);
            }
            OrderEvent::QuantitySelected(e) => {
                self.state.quantity = e.quantity;
                self.state.reprice(&self.rules.prices);
            }
            OrderEvent::FlavorSelected(e) => {
                self.state.flavor = e.flavor.clone();
            }
            OrderEvent::PickupDateSelected(e) => {
                self.state.pickup_date = e.pickup_date.clone();
                self.state.reprice(&self.rules.prices);
            }
        }
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::Begin { pickup_options, replaces } => {
                if self.version != 0 {
                    return Err(OrderError::AlreadyStarted(self.id));
                }

                let pickup_options = pickup_options.clone();
                match replaces {
                    Some(previous_order_id) => Ok(vec![OrderEvent::Reset(OrderReset {
                        previous_order_id: *previous_order_id,
                        pickup_options,
                    })]),
                    None => Ok(vec![OrderEvent::Started(OrderStarted { pickup_options })]),
                }
            }

            OrderCommand::SetQuantity { quantity } => {
                if self.strict() && !self.rules.quantity_options.contains(quantity) {
                    return Err(OrderError::UnsupportedQuantity(*quantity));
                }

                Ok(vec![OrderEvent::QuantitySelected(QuantitySelected {
                    quantity: *quantity,
                })])
            }

            OrderCommand::SetFlavor { flavor } => {
                if self.strict() && !self.rules.flavors.contains(flavor) {
                    return Err(OrderError::UnknownFlavor(flavor.clone()));
                }

                Ok(vec![OrderEvent::FlavorSelected(FlavorSelected {
                    flavor: flavor.clone(),
                })])
            }

            OrderCommand::SetPickupDate { pickup_date } => {
                if self.strict() && !self.state.pickup_options.contains(pickup_date) {
                    return Err(OrderError::UnavailablePickupDate(pickup_date.clone()));
                }

                Ok(vec![OrderEvent::PickupDateSelected(PickupDateSelected {
                    pickup_date: pickup_date.clone(),
                })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
