pub mod booking_state;
pub mod catalog;
pub mod coordinator;
pub mod deferred;
pub mod highlight;
pub mod router;
pub mod selection;

pub use crate::domain::model::{
    BookingOption, BookingReceipt, BookingSnapshot, Category, ConfirmationResponse, FlowState,
    Screen,
};
pub use crate::domain::ports::{BookingSink, PresentationPort};
pub use crate::utils::error::Result;
