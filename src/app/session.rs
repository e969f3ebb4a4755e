use std::sync::Arc;
use serde::Serialize;
use tokio::sync::watch;

use crate::config::{MenuConfig, OrderConfig};
use crate::domain::order::{Clock, OrderError, OrderState, OrderStore, SystemClock};
use crate::flow::{FlowError, OrderFlow, Step};
use super::share::{OrderShare, OrderSharer, ShareError};

// ============================================================================
// Cupcake Session - Entry Point For The Presentation Layer
// ============================================================================
//
// Owns one order store and one flow controller and wires the screen
// callbacks to them:
//
//   Start   -- quantity button --> set_quantity + advance
//   Flavor  -- option / next / cancel
//   Pickup  -- option / next / cancel
//   Summary -- send / cancel
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SendOrderError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Share(#[from] ShareError),
}

/// Choices offered on a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepOptions {
    Quantities(Vec<u32>),
    Choices(Vec<String>),
    None,
}

/// Everything a screen needs to render itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenModel {
    pub step: Step,
    pub title: &'static str,
    pub can_navigate_back: bool,
    /// Whether "next" is enabled
    pub can_advance: bool,
    /// Whether the chosen date carries the same-day surcharge
    pub same_day_pickup: bool,
    pub order: OrderState,
    pub options: StepOptions,
}

pub struct CupcakeApp {
    store: OrderStore,
    flow: OrderFlow,
    menu: MenuConfig,
}

impl CupcakeApp {
    pub fn new(config: OrderConfig, clock: Arc<dyn Clock>) -> Result<Self, OrderError> {
        let store = OrderStore::new(&config, clock)?;
        Ok(Self {
            store,
            flow: OrderFlow::new(),
            menu: config.menu,
        })
    }

    pub fn with_system_clock(config: OrderConfig) -> Result<Self, OrderError> {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn flow(&self) -> &OrderFlow {
        &self.flow
    }

    pub fn state(&self) -> &OrderState {
        self.store.state()
    }

    pub fn step(&self) -> Step {
        self.flow.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<OrderState> {
        self.store.subscribe()
    }

    /// Quantity button on the start screen: record it and move on to flavors
    pub fn start_order(&mut self, quantity: u32) -> Result<Step, FlowError> {
        self.require_step(Step::Start)?;
        self.store.set_quantity(quantity)?;
        self.flow.advance()
    }

    pub fn select_flavor(&mut self, flavor: impl Into<String>) -> Result<&OrderState, FlowError> {
        Ok(self.store.set_flavor(flavor)?)
    }

    pub fn select_pickup_date(&mut self, pickup_date: impl Into<String>) -> Result<&OrderState, FlowError> {
        Ok(self.store.set_date(pickup_date)?)
    }

    /// Whether the current step's selection has been made
    pub fn can_advance(&self) -> bool {
        let order = self.store.state();
        match self.flow.current() {
            Step::Start => order.quantity > 0,
            Step::Flavor => !order.flavor.is_empty(),
            Step::Pickup => !order.pickup_date.is_empty(),
            Step::Summary => false,
        }
    }

    /// "Next" button
    pub fn next(&mut self) -> Result<Step, FlowError> {
        let current = self.flow.current();
        if current.next().is_none() {
            return Err(FlowError::NoNextStep(current));
        }
        if !self.can_advance() {
            return Err(FlowError::SelectionRequired(current));
        }
        self.flow.advance()
    }

    /// "Cancel" button; see `OrderFlow::cancel` for when it can fail
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        self.flow.cancel(&mut self.store)
    }

    /// Up arrow / system back
    pub fn navigate_up(&mut self) -> bool {
        self.flow.navigate_up()
    }

    pub fn screen(&self) -> ScreenModel {
        let step = self.flow.current();
        let options = match step {
            Step::Start => StepOptions::Quantities(self.menu.quantity_options.clone()),
            Step::Flavor => StepOptions::Choices(self.menu.flavors.clone()),
            Step::Pickup => StepOptions::Choices(self.store.state().pickup_options.clone()),
            Step::Summary => StepOptions::None,
        };

        ScreenModel {
            step,
            title: step.title(),
            can_navigate_back: self.flow.can_navigate_back(),
            can_advance: self.can_advance(),
            same_day_pickup: self.store.state().is_same_day_pickup(),
            order: self.store.state().clone(),
            options,
        }
    }

    /// "Send" button on the summary screen
    ///
    /// `subject` and `summary` are composed by the caller from the current
    /// snapshot; the order itself is left untouched.
    pub async fn send_order<S>(
        &self,
        sharer: &S,
        subject: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<(), SendOrderError>
    where
        S: OrderSharer + ?Sized,
    {
        self.require_step(Step::Summary)?;

        let share = OrderShare {
            subject: subject.into(),
            summary: summary.into(),
        };
        sharer.share(&share).await?;

        tracing::info!(
            order_id = %self.store.order_id(),
            correlation_id = %self.store.correlation_id(),
            price = %self.store.state().price,
            "✅ Order sent"
        );
        Ok(())
    }

    fn require_step(&self, expected: Step) -> Result<(), FlowError> {
        let actual = self.flow.current();
        if actual == expected {
            Ok(())
        } else {
            Err(FlowError::NotOnStep { expected, actual })
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
