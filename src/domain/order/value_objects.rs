use std::ops::Add;
use serde::{Deserialize, Serialize};

use crate::config::{OrderConfig, PricingConfig};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Amount of money in minor units (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(count)))
    }

    /// Currency text with grouped thousands and two decimals, e.g. `$1,234.50`
    pub fn format(self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();
        let fraction = abs % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("{sign}{symbol}{grouped}.{fraction:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

/// Whether selections must come from the offered options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Any quantity, flavor or date is stored as given
    #[default]
    Lenient,
    /// Quantities, flavors and dates outside the offered options are rejected
    Strict,
}

/// Unit price plus same-day surcharge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSchedule {
    unit_price: Money,
    same_day_surcharge: Money,
    currency_symbol: String,
}

impl PriceSchedule {
    pub fn new(pricing: &PricingConfig) -> Self {
        Self {
            unit_price: pricing.unit_price,
            same_day_surcharge: pricing.same_day_surcharge,
            currency_symbol: pricing.currency_symbol.clone(),
        }
    }

    /// Price of `quantity` cupcakes picked up on `pickup_date`
    ///
    /// The surcharge applies when `pickup_date` is the first of the
    /// currently offered `pickup_options` (today).
    pub fn calculate(&self, quantity: u32, pickup_date: &str, pickup_options: &[String]) -> Money {
        let mut price = self.unit_price.times(quantity);
        if pickup_options.first().is_some_and(|today| today == pickup_date) {
            price = price + self.same_day_surcharge;
        }
        price
    }

    pub fn format(&self, amount: Money) -> String {
        amount.format(&self.currency_symbol)
    }
}

/// Everything the order aggregate needs to price and check selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRules {
    pub prices: PriceSchedule,
    pub quantity_options: Vec<u32>,
    pub flavors: Vec<String>,
    pub policy: SelectionPolicy,
}

impl OrderRules {
    pub fn from_config(config: &OrderConfig) -> Self {
        Self {
            prices: PriceSchedule::new(&config.pricing),
            quantity_options: config.menu.quantity_options.clone(),
            flavors: config.menu.flavors.clone(),
            policy: config.selection_policy,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Mon Jan 1", "Tue Jan 2", "Wed Jan 3", "Thu Jan 4"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(Money::ZERO.format("$"), "$0.00");
        assert_eq!(Money::from_cents(5).format("$"), "$0.05");
        assert_eq!(Money::from_cents(1200).format("$"), "$12.00");
        assert_eq!(Money::from_cents(123_450).format("$"), "$1,234.50");
        assert_eq!(Money::from_cents(100_000_000).format("$"), "$1,000,000.00");
        assert_eq!(Money::from_cents(-300).format("$"), "-$3.00");
        assert_eq!(Money::from_cents(250).format("€"), "€2.50");
    }

    #[test]
    fn test_money_arithmetic() {
        assert_eq!(Money::from_cents(200).times(6), Money::from_cents(1200));
        assert_eq!(Money::from_cents(1200) + Money::from_cents(300), Money::from_cents(1500));
        assert_eq!(Money::from_cents(i64::MAX).times(2), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_price_without_pickup_date() {
        let prices = PriceSchedule::new(&PricingConfig::default());
        assert_eq!(prices.calculate(6, "", &options()), Money::from_cents(1200));
        assert_eq!(prices.calculate(0, "", &options()), Money::ZERO);
    }

    #[test]
    fn test_same_day_surcharge_only_for_first_option() {
        let prices = PriceSchedule::new(&PricingConfig::default());
        let options = options();

        assert_eq!(prices.calculate(6, "Mon Jan 1", &options), Money::from_cents(1500));
        for later in &options[1..] {
            assert_eq!(prices.calculate(6, later, &options), Money::from_cents(1200));
        }
        // Surcharge is per order, not per cupcake
        assert_eq!(prices.calculate(12, "Mon Jan 1", &options), Money::from_cents(2700));
        assert_eq!(prices.calculate(0, "Mon Jan 1", &options), Money::from_cents(300));
    }

    #[test]
    fn test_no_options_means_no_surcharge() {
        let prices = PriceSchedule::new(&PricingConfig::default());
        assert_eq!(prices.calculate(1, "Mon Jan 1", &[]), Money::from_cents(200));
    }

    #[test]
    fn test_selection_policy_serialization() {
        assert_eq!(serde_json::to_string(&SelectionPolicy::Strict).unwrap(), "\"strict\"");
        let policy: SelectionPolicy = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(policy, SelectionPolicy::Lenient);
    }
}
