// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// The cupcake order aggregate and its store. Independent of the wizard
// flow and of any presentation layer.
//
// ============================================================================

pub mod order;
