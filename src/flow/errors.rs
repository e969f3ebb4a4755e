use crate::domain::order::OrderError;
use super::step::Step;

// ============================================================================
// Navigation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("No step follows {0}")]
    NoNextStep(Step),

    #[error("A selection is required before leaving {0}")]
    SelectionRequired(Step),

    #[error("Action is only available on {expected}, current step is {actual}")]
    NotOnStep { expected: Step, actual: Step },

    #[error(transparent)]
    Order(#[from] OrderError),
}
