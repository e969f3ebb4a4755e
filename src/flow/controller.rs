use crate::domain::order::OrderStore;
use super::errors::FlowError;
use super::step::Step;

// ============================================================================
// Order Flow - Wizard Navigation
// ============================================================================
//
// Keeps the stack of visited steps. The stack always starts with `Start`
// and only ever grows by the step that follows its top, so it mirrors the
// wizard order exactly.
//
// ============================================================================

/// Navigation inputs from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// "Next" button
    Advance,
    /// Platform back / app bar up arrow
    NavigateUp,
    /// "Cancel" button; also resets the order
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFlow {
    back_stack: Vec<Step>,
}

impl Default for OrderFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderFlow {
    pub fn new() -> Self {
        Self {
            back_stack: vec![Step::Start],
        }
    }

    pub fn current(&self) -> Step {
        self.back_stack.last().copied().unwrap_or_default()
    }

    /// Visited steps, oldest first
    pub fn back_stack(&self) -> &[Step] {
        &self.back_stack
    }

    /// Whether an up/back affordance should be shown
    pub fn can_navigate_back(&self) -> bool {
        !self.current().is_initial()
    }

    /// Move to the step after the current one
    pub fn advance(&mut self) -> Result<Step, FlowError> {
        let current = self.current();
        let next = current.next().ok_or(FlowError::NoNextStep(current))?;
        self.back_stack.push(next);

        tracing::info!(from = %current, to = %next, "➡️ Advanced wizard step");
        Ok(next)
    }

    /// Return to the previous step without touching the order.
    /// Returns false when already at `Start`.
    pub fn navigate_up(&mut self) -> bool {
        if self.back_stack.len() <= 1 {
            return false;
        }

        let left = self.back_stack.pop();
        tracing::debug!(from = ?left, to = %self.current(), "Navigated up");
        true
    }

    /// Reset the order and pop everything down to `Start`.
    /// Errors can only come from `OrderStore::reset_order`, which opens a
    /// fresh stream and so has nothing to conflict with.
    pub fn cancel(&mut self, store: &mut OrderStore) -> Result<(), FlowError> {
        let from = self.current();
        store.reset_order()?;
        self.back_stack.truncate(1);

        tracing::info!(from = %from, order_id = %store.order_id(), "🗑️ Order cancelled, back to start");
        Ok(())
    }

    /// Apply a navigation event; returns the resulting step
    pub fn process(&mut self, event: FlowEvent, store: &mut OrderStore) -> Result<Step, FlowError> {
        match event {
            FlowEvent::Advance => {
                self.advance()?;
            }
            FlowEvent::NavigateUp => {
                self.navigate_up();
            }
            FlowEvent::Cancel => {
                self.cancel(store)?;
            }
        }
        Ok(self.current())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
