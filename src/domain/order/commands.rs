use uuid::Uuid;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    /// Open a new order stream with freshly generated pickup options.
    /// Emits `Reset` when the order replaces a cancelled one, `Started` otherwise.
    Begin {
        pickup_options: Vec<String>,
        replaces: Option<Uuid>,
    },
    SetQuantity {
        quantity: u32,
    },
    SetFlavor {
        flavor: String,
    },
    SetPickupDate {
        pickup_date: String,
    },
}
