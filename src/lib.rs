pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::CatalogConfig;
pub use crate::core::{
    booking_state::BookingState,
    catalog::OptionCatalog,
    coordinator::{BookingCoordinator, BookingPolicy, ConfirmOutcome},
    highlight::HighlightPlan,
    selection::SelectionSet,
};
pub use crate::domain::model::{
    BookingOption, BookingReceipt, BookingSnapshot, Category, ConfirmationResponse, FlowState,
    Screen,
};
pub use crate::domain::ports::{BookingSink, PresentationPort};
pub use crate::utils::error::{BookingError, Result};
