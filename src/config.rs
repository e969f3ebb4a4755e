use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Money, SelectionPolicy};

// ============================================================================
// Order Configuration
// ============================================================================
//
// Menu and pricing values for the ordering wizard. `Default` carries the
// shop's standard menu; `from_env` lets a deployment override single values
// without a config file.
//
// ============================================================================

pub const ENV_UNIT_PRICE_CENTS: &str = "CUPCAKE_UNIT_PRICE_CENTS";
pub const ENV_SAME_DAY_SURCHARGE_CENTS: &str = "CUPCAKE_SAME_DAY_SURCHARGE_CENTS";
pub const ENV_CURRENCY_SYMBOL: &str = "CUPCAKE_CURRENCY_SYMBOL";
pub const ENV_STRICT_SELECTION: &str = "CUPCAKE_STRICT_SELECTION";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price for a single cupcake
    pub unit_price: Money,
    /// Additional cost for same day pickup of an order
    pub same_day_surcharge: Money,
    pub currency_symbol: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            unit_price: Money::from_cents(200),
            same_day_surcharge: Money::from_cents(300),
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    pub quantity_options: Vec<u32>,
    pub flavors: Vec<String>,
    /// chrono format string for pickup date labels
    pub date_format: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            quantity_options: vec![1, 6, 12],
            flavors: ["Vanilla", "Chocolate", "Red Velvet", "Salted Caramel", "Coffee"]
                .into_iter()
                .map(String::from)
                .collect(),
            date_format: "%a %b %-d".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderConfig {
    pub pricing: PricingConfig,
    pub menu: MenuConfig,
    pub selection_policy: SelectionPolicy,
}

impl OrderConfig {
    /// Standard menu, but selections outside the offered options are rejected
    pub fn strict() -> Self {
        Self {
            selection_policy: SelectionPolicy::Strict,
            ..Self::default()
        }
    }

    /// Defaults overlaid with any `CUPCAKE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(cents) = parse_var::<i64, _>(&lookup, ENV_UNIT_PRICE_CENTS)? {
            config.pricing.unit_price = Money::from_cents(cents);
        }
        if let Some(cents) = parse_var::<i64, _>(&lookup, ENV_SAME_DAY_SURCHARGE_CENTS)? {
            config.pricing.same_day_surcharge = Money::from_cents(cents);
        }
        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.pricing.currency_symbol = symbol;
        }
        if let Some(raw) = lookup(ENV_STRICT_SELECTION) {
            config.selection_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => SelectionPolicy::Strict,
                "0" | "false" | "no" => SelectionPolicy::Lenient,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_STRICT_SELECTION.to_string(),
                        value: raw,
                    })
                }
            };
        }

        tracing::debug!(
            unit_price = config.pricing.unit_price.cents(),
            same_day_surcharge = config.pricing.same_day_surcharge.cents(),
            policy = ?config.selection_policy,
            "Loaded order configuration"
        );

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_menu_matches_shop() {
        let config = OrderConfig::default();

        assert_eq!(config.pricing.unit_price, Money::from_cents(200));
        assert_eq!(config.pricing.same_day_surcharge, Money::from_cents(300));
        assert_eq!(config.menu.quantity_options, vec![1, 6, 12]);
        assert_eq!(config.menu.flavors.len(), 5);
        assert_eq!(config.menu.date_format, "%a %b %-d");
        assert_eq!(config.selection_policy, SelectionPolicy::Lenient);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = OrderConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, OrderConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = OrderConfig::from_lookup(lookup_from(&[
            (ENV_UNIT_PRICE_CENTS, "250"),
            (ENV_SAME_DAY_SURCHARGE_CENTS, " 500 "),
            (ENV_CURRENCY_SYMBOL, "€"),
            (ENV_STRICT_SELECTION, "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.pricing.unit_price, Money::from_cents(250));
        assert_eq!(config.pricing.same_day_surcharge, Money::from_cents(500));
        assert_eq!(config.pricing.currency_symbol, "€");
        assert_eq!(config.selection_policy, SelectionPolicy::Strict);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let err = OrderConfig::from_lookup(lookup_from(&[(ENV_UNIT_PRICE_CENTS, "two")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_UNIT_PRICE_CENTS.to_string(),
                value: "two".to_string()
            }
        );

        assert!(OrderConfig::from_lookup(lookup_from(&[(ENV_STRICT_SELECTION, "maybe")])).is_err());
    }

    #[test]
    fn test_pickup_day_count_is_not_configurable() {
        let config = OrderConfig::from_lookup(lookup_from(&[("CUPCAKE_PICKUP_DAYS", "2")])).unwrap();
        assert_eq!(config, OrderConfig::default());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = OrderConfig::strict();
        let json = serde_json::to_string(&config).unwrap();
        let restored: OrderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
