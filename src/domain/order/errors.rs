use uuid::Uuid;

use crate::config::ConfigError;
use crate::event_sourcing::EventStoreError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Quantity {0} is not on the menu")]
    UnsupportedQuantity(u32),

    #[error("Unknown flavor: {0:?}")]
    UnknownFlavor(String),

    #[error("Pickup date {0:?} is not currently offered")]
    UnavailablePickupDate(String),

    #[error("Order {0} has already started")]
    AlreadyStarted(Uuid),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] EventStoreError),
}
