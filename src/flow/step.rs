use std::fmt;
use serde::{Deserialize, Serialize};

// ============================================================================
// Wizard Steps
// ============================================================================

/// One stage of the ordering wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Pick a quantity
    #[default]
    Start,
    Flavor,
    Pickup,
    /// Review and send; terminal until cancel
    Summary,
}

impl Step {
    /// All steps in wizard order
    pub const ALL: [Step; 4] = [Step::Start, Step::Flavor, Step::Pickup, Step::Summary];

    /// Forward transition table
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Start => Some(Step::Flavor),
            Step::Flavor => Some(Step::Pickup),
            Step::Pickup => Some(Step::Summary),
            Step::Summary => None,
        }
    }

    pub fn is_initial(self) -> bool {
        self == Step::Start
    }

    /// Screen title shown in the app bar
    pub fn title(self) -> &'static str {
        match self {
            Step::Start => "Cupcake",
            Step::Flavor => "Choose Flavor",
            Step::Pickup => "Choose Pickup Date",
            Step::Summary => "Order Summary",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Start => "Start",
            Step::Flavor => "Flavor",
            Step::Pickup => "Pickup",
            Step::Summary => "Summary",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_follows_wizard_order() {
        for pair in Step::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(Step::Summary.next(), None);
    }

    #[test]
    fn test_only_start_is_initial() {
        assert_eq!(Step::default(), Step::Start);
        let initial: Vec<Step> = Step::ALL.into_iter().filter(|s| s.is_initial()).collect();
        assert_eq!(initial, vec![Step::Start]);
    }

    #[test]
    fn test_titles_and_names() {
        assert_eq!(Step::Pickup.title(), "Choose Pickup Date");
        assert_eq!(Step::Pickup.to_string(), "Pickup");
        assert_eq!(serde_json::to_string(&Step::Summary).unwrap(), "\"Summary\"");
    }
}
