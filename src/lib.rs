//! Order state core for a cupcake ordering wizard.
//!
//! Quantity, flavor and pickup-date selection with a derived price
//! ([`domain::order::OrderStore`]), a four step navigation flow
//! ([`flow::OrderFlow`]) and a session type wiring both for a
//! presentation layer ([`app::CupcakeApp`]).

pub mod app;
pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod flow;

pub use app::{CupcakeApp, OrderSharer, ScreenModel, TracingSharer};
pub use config::OrderConfig;
pub use domain::order::{OrderError, OrderState, OrderStore};
pub use flow::{FlowError, OrderFlow, Step};
