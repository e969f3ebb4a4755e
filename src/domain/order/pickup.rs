use std::fmt::Write;
use std::sync::atomic::{AtomicI32, Ordering};
use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Days, Local, NaiveDate};

use crate::config::{ConfigError, MenuConfig};

/// Pickup dates on offer: today and the three days after it
pub const PICKUP_DAYS: usize = 4;

// ============================================================================
// Pickup Calendar - Offered Pickup Dates
// ============================================================================

/// Source of "today" for pickup date generation
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a settable date
#[derive(Debug)]
pub struct FixedClock {
    days_from_ce: AtomicI32,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            days_from_ce: AtomicI32::new(today.num_days_from_ce()),
        }
    }

    pub fn advance_days(&self, days: i32) {
        self.days_from_ce.fetch_add(days, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        let days = self.days_from_ce.load(Ordering::SeqCst);
        NaiveDate::from_num_days_from_ce_opt(days).unwrap_or(NaiveDate::MAX)
    }
}

/// Generates the labels of the consecutive pickup days on offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupCalendar {
    date_format: String,
}

impl PickupCalendar {
    /// Fails when `menu.date_format` cannot render a calendar date
    pub fn new(menu: &MenuConfig) -> Result<Self, ConfigError> {
        check_date_format(&menu.date_format)?;
        Ok(Self {
            date_format: menu.date_format.clone(),
        })
    }

    /// `today` and the following days, one label each, e.g. `"Mon Jan 1"`
    pub fn options(&self, today: NaiveDate) -> Vec<String> {
        (0..PICKUP_DAYS as u64)
            .map_while(|offset| today.checked_add_days(Days::new(offset)))
            .map(|date| date.format(&self.date_format).to_string())
            .collect()
    }
}

// Unknown specifiers fail to parse; time and zone specifiers parse but
// fail when rendered from a bare date.
fn check_date_format(date_format: &str) -> Result<(), ConfigError> {
    let unparsable = StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error));
    let mut rendered = String::new();
    let unrenderable = write!(rendered, "{}", NaiveDate::MIN.format(date_format)).is_err();

    if unparsable || unrenderable {
        return Err(ConfigError::InvalidValue {
            key: "menu.date_format".to_string(),
            value: date_format.to_string(),
        });
    }
    Ok(())
}
