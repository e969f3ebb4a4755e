use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::OrderConfig;
use crate::event_sourcing::{Aggregate, EventEnvelope, EventStore};

use super::aggregate::{OrderAggregate, OrderState};
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::OrderEvent;
use super::pickup::{Clock, PickupCalendar, SystemClock};
use super::value_objects::OrderRules;

// ============================================================================
// Order Store - Single Writer Of The Order State
// ============================================================================
//
// Orchestrates: Command → Aggregate → Events → Event Log → Snapshot
//
// Every mutation is applied immediately; readers get the latest committed
// snapshot either by reference or through a watch channel.
//
// Each order attempt gets its own stream. A reset opens a new stream and
// drops the old one, so the log only ever holds the current order.
//
// ============================================================================

pub struct OrderStore {
    aggregate: OrderAggregate,
    events: EventStore<OrderEvent>,
    calendar: PickupCalendar,
    clock: Arc<dyn Clock>,
    correlation_id: Uuid,
    publisher: watch::Sender<OrderState>,
}

impl OrderStore {
    /// Store holding a fresh order, pickup options anchored at `clock.today()`
    pub fn new(config: &OrderConfig, clock: Arc<dyn Clock>) -> Result<Self, OrderError> {
        let rules = OrderRules::from_config(config);
        let aggregate = OrderAggregate::blank(Uuid::new_v4(), rules);
        let (publisher, _) = watch::channel(aggregate.state().clone());

        let mut store = Self {
            aggregate,
            events: EventStore::new("CupcakeOrder"),
            calendar: PickupCalendar::new(&config.menu)?,
            clock,
            correlation_id: Uuid::new_v4(),
            publisher,
        };
        store.begin(None)?;

        tracing::info!(order_id = %store.order_id(), "Order store ready");
        Ok(store)
    }

    pub fn with_system_clock(config: &OrderConfig) -> Result<Self, OrderError> {
        Self::new(config, Arc::new(SystemClock))
    }

    // The setters only return `Err` under `SelectionPolicy::Strict`

    pub fn set_quantity(&mut self, quantity: u32) -> Result<&OrderState, OrderError> {
        self.dispatch(OrderCommand::SetQuantity { quantity })
    }

    pub fn set_flavor(&mut self, flavor: impl Into<String>) -> Result<&OrderState, OrderError> {
        self.dispatch(OrderCommand::SetFlavor { flavor: flavor.into() })
    }

    pub fn set_date(&mut self, pickup_date: impl Into<String>) -> Result<&OrderState, OrderError> {
        self.dispatch(OrderCommand::SetPickupDate { pickup_date: pickup_date.into() })
    }

    /// Discard the order: clear selections and regenerate pickup options
    /// anchored at the moment of the call.
    ///
    /// Never fails in practice: the first append to a brand new stream has
    /// no version to conflict with.
    pub fn reset_order(&mut self) -> Result<&OrderState, OrderError> {
        let previous = self.order_id();
        self.aggregate = OrderAggregate::blank(Uuid::new_v4(), self.aggregate.rules().clone());
        self.correlation_id = Uuid::new_v4();
        self.begin(Some(previous))?;

        let dropped = self.events.remove_stream(previous);
        tracing::debug!(
            previous_order_id = %previous,
            order_id = %self.order_id(),
            dropped_events = dropped,
            "Order stream replaced"
        );
        Ok(self.aggregate.state())
    }

    /// Latest committed snapshot
    pub fn state(&self) -> &OrderState {
        self.aggregate.state()
    }

    /// Receiver that always holds the latest snapshot and wakes on change
    pub fn subscribe(&self) -> watch::Receiver<OrderState> {
        self.publisher.subscribe()
    }

    /// Stream id of the current order; changes on every reset
    pub fn order_id(&self) -> Uuid {
        self.aggregate.aggregate_id()
    }

    /// Changes on every reset, together with `order_id`
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn version(&self) -> i64 {
        self.aggregate.version()
    }

    pub fn history(&self) -> &[EventEnvelope<OrderEvent>] {
        self.events.load_events(self.order_id())
    }

    pub fn history_json(&self) -> anyhow::Result<String> {
        self.events.export_json(self.order_id())
    }

    /// Snapshot rebuilt from the event log alone
    pub fn replay(&self) -> anyhow::Result<OrderState> {
        let blank = OrderAggregate::blank(self.order_id(), self.aggregate.rules().clone());
        let rebuilt = blank.replay(self.history())?;
        Ok(rebuilt.state().clone())
    }

    fn begin(&mut self, replaces: Option<Uuid>) -> Result<&OrderState, OrderError> {
        let pickup_options = self.calendar.options(self.clock.today());
        self.dispatch(OrderCommand::Begin { pickup_options, replaces })
    }

    fn dispatch(&mut self, command: OrderCommand) -> Result<&OrderState, OrderError> {
        let order_id = self.order_id();
        let correlation_id = self.correlation_id;
        let expected_version = self.aggregate.version();

        let domain_events = match self.aggregate.handle_command(&command) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(order_id = %order_id, command = ?command, error = %err, "Order command rejected");
                return Err(err);
            }
        };

        let envelopes = domain_events
            .iter()
            .cloned()
            .map(|event| EventEnvelope::new(order_id, 0, event, correlation_id))
            .collect();

        let new_version = self.events.append_events(order_id, expected_version, envelopes)?;

        for event in &domain_events {
            self.aggregate.apply_event(event);
        }
        self.aggregate.set_version(new_version);

        let state = self.aggregate.state();
        tracing::debug!(
            order_id = %order_id,
            version = new_version,
            quantity = state.quantity,
            flavor = %state.flavor,
            pickup_date = %state.pickup_date,
            price = %state.price,
            "Order state updated"
        );

        self.publisher.send_replace(state.clone());
        Ok(self.aggregate.state())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::config::ConfigError;
    use crate::domain::order::{FixedClock, Money};

    fn new_years_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn store_with(config: &OrderConfig) -> (OrderStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(new_years_day()));
        let store = OrderStore::new(config, clock.clone()).unwrap();
        (store, clock)
    }

    fn store() -> (OrderStore, Arc<FixedClock>) {
        store_with(&OrderConfig::default())
    }

    #[test]
    fn test_new_store_has_default_state() {
        let (store, _) = store();
        let state = store.state();

        assert_eq!(state.quantity, 0);
        assert_eq!(state.flavor, "");
        assert_eq!(state.pickup_date, "");
        assert_eq!(state.price, "$0.00");
        assert_eq!(state.pickup_options, vec!["Mon Jan 1", "Tue Jan 2", "Wed Jan 3", "Thu Jan 4"]);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_set_quantity_prices_without_surcharge() {
        let (mut store, _) = store();

        for quantity in [0, 1, 6, 12, 25] {
            let state = store.set_quantity(quantity).unwrap();
            assert_eq!(state.quantity, quantity);
            assert_eq!(state.subtotal, Money::from_cents(200 * i64::from(quantity)));
            assert_eq!(state.price, Money::from_cents(200 * i64::from(quantity)).format("$"));
        }
    }

    #[test]
    fn test_end_to_end_pricing_scenario() {
        let (mut store, _) = store();

        assert_eq!(store.set_quantity(6).unwrap().price, "$12.00");
        assert_eq!(store.set_date("Mon Jan 1").unwrap().price, "$15.00");
        assert_eq!(store.set_date("Tue Jan 2").unwrap().price, "$12.00");

        let state = store.reset_order().unwrap();
        assert_eq!(state.quantity, 0);
        assert_eq!(state.flavor, "");
        assert_eq!(state.pickup_date, "");
        assert_eq!(state.price, "$0.00");
    }

    #[test]
    fn test_selection_order_does_not_change_price() {
        let options = store().0.state().pickup_options.clone();

        for date in &options {
            let (mut quantity_first, _) = store();
            quantity_first.set_quantity(6).unwrap();
            quantity_first.set_date(date.as_str()).unwrap();

            let (mut date_first, _) = store();
            date_first.set_date(date.as_str()).unwrap();
            date_first.set_quantity(6).unwrap();

            assert_eq!(quantity_first.state().price, date_first.state().price);
        }
    }

    #[test]
    fn test_set_flavor_keeps_price() {
        let (mut store, _) = store();
        store.set_quantity(1).unwrap();

        let state = store.set_flavor("Salted Caramel").unwrap();

        assert_eq!(state.flavor, "Salted Caramel");
        assert_eq!(state.price, "$2.00");
    }

    #[test]
    fn test_reset_regenerates_options_from_call_time() {
        let (mut store, clock) = store();
        let first_order = store.order_id();
        let first_correlation = store.correlation_id();
        store.set_quantity(12).unwrap();
        store.set_date("Mon Jan 1").unwrap();

        clock.advance_days(3);
        let state = store.reset_order().unwrap().clone();

        assert_eq!(state.pickup_options, vec!["Thu Jan 4", "Fri Jan 5", "Sat Jan 6", "Sun Jan 7"]);
        assert_eq!(state.quantity, 0);
        assert_ne!(store.correlation_id(), first_correlation);
        assert_ne!(store.order_id(), first_order);

        // The new first option carries the surcharge, the old one no longer does
        assert_eq!(store.set_date("Thu Jan 4").unwrap().price, "$3.00");
        assert_eq!(store.set_date("Mon Jan 1").unwrap().price, "$0.00");
    }

    #[test]
    fn test_lenient_store_accepts_unlisted_values() {
        let (mut store, _) = store();

        store.set_flavor("Mystery").unwrap();
        store.set_date("Next Tuesday").unwrap();

        assert_eq!(store.state().flavor, "Mystery");
        assert_eq!(store.state().pickup_date, "Next Tuesday");
        assert!(!store.state().is_same_day_pickup());
    }

    #[test]
    fn test_strict_store_rejects_and_keeps_state() {
        let (mut store, _) = store_with(&OrderConfig::strict());
        store.set_quantity(6).unwrap();
        let before = store.state().clone();
        let version = store.version();

        assert_eq!(store.set_quantity(5).unwrap_err(), OrderError::UnsupportedQuantity(5));
        assert_eq!(
            store.set_date("Fri Jan 5").unwrap_err(),
            OrderError::UnavailablePickupDate("Fri Jan 5".to_string())
        );

        assert_eq!(store.state(), &before);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_history_records_every_mutation() {
        let (mut store, _) = store();
        store.set_quantity(6).unwrap();
        store.set_flavor("Vanilla").unwrap();
        store.set_date("Wed Jan 3").unwrap();

        let types: Vec<&str> = store.history().iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["OrderStarted", "QuantitySelected", "FlavorSelected", "PickupDateSelected"]
        );

        let sequence: Vec<i64> = store.history().iter().map(|e| e.sequence_number).collect();
        assert_eq!(sequence, vec![1, 2, 3, 4]);
        assert_eq!(store.version(), 4);

        let history = store.history();
        assert!(history.iter().all(|e| e.correlation_id == store.correlation_id()));
        assert!(history.iter().all(|e| e.aggregate_id == store.order_id()));
    }

    #[test]
    fn test_reset_starts_a_new_stream() {
        let (mut store, _) = store();
        let first_order = store.order_id();
        store.set_quantity(6).unwrap();
        store.set_flavor("Vanilla").unwrap();

        store.reset_order().unwrap();

        let history = store.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_type, "OrderReset");
        assert_eq!(history[0].sequence_number, 1);
        assert!(matches!(
            &history[0].event_data,
            OrderEvent::Reset(reset) if reset.previous_order_id == first_order
        ));
        assert_eq!(store.version(), 1);
        assert_eq!(store.replay().unwrap(), *store.state());
    }

    #[test]
    fn test_history_stays_bounded_across_resets() {
        let (mut store, _) = store();

        for round in 0..1_000 {
            store.set_quantity(round % 12).unwrap();
            store.set_flavor("Coffee").unwrap();
            store.reset_order().unwrap();
        }

        assert_eq!(store.history().len(), 1);
        assert_eq!(store.version(), 1);

        store.set_quantity(6).unwrap();
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_bad_date_format_fails_store_creation() {
        let mut config = OrderConfig::default();
        config.menu.date_format = "%Q".to_string();
        let clock = Arc::new(FixedClock::new(new_years_day()));

        let err = OrderStore::new(&config, clock).err();

        assert_eq!(
            err,
            Some(OrderError::Config(ConfigError::InvalidValue {
                key: "menu.date_format".to_string(),
                value: "%Q".to_string(),
            }))
        );
    }

    #[test]
    fn test_replay_matches_live_state() {
        let (mut store, _) = store();
        store.set_quantity(12).unwrap();
        store.set_flavor("Chocolate").unwrap();
        store.set_date("Mon Jan 1").unwrap();

        assert_eq!(store.replay().unwrap(), *store.state());

        let json = store.history_json().unwrap();
        assert!(json.contains("\"PickupDateSelected\""));
    }

    #[test]
    fn test_subscriber_sees_latest_snapshot() {
        let (mut store, _) = store();
        let receiver = store.subscribe();

        store.set_quantity(6).unwrap();
        store.set_date("Mon Jan 1").unwrap();

        let latest = receiver.borrow();
        assert_eq!(latest.quantity, 6);
        assert_eq!(latest.price, "$15.00");
    }

    #[tokio::test]
    async fn test_subscriber_is_notified_of_change() {
        let (mut store, _) = store();
        let mut receiver = store.subscribe();
        receiver.borrow_and_update();

        store.set_flavor("Coffee").unwrap();

        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().flavor, "Coffee");
    }
}
