use crate::domain::model::{BookingReceipt, BookingSnapshot, Category, ConfirmationResponse, Screen};
use crate::utils::error::Result;

/// Rendering side of the booking flow. Implementations own the widgets and
/// look them up by `(category, option_id)`; they never mutate booking state.
pub trait PresentationPort {
    /// Emphasize `option_id` and clear emphasis on every sibling in `category`.
    fn highlight(&mut self, category: Category, option_id: Option<&str>);

    fn show_validation_warning(&mut self, message: &str);

    fn prompt_confirmation(&mut self, snapshot: &BookingSnapshot) -> ConfirmationResponse;

    fn show_success(&mut self, message: &str);

    /// Informational text that is neither a warning nor a success.
    fn show_message(&mut self, _message: &str) {}

    fn navigate(&mut self, screen: Screen);
}

/// Receives accepted bookings, e.g. a driver-matching client.
pub trait BookingSink {
    fn submit(&mut self, receipt: &BookingReceipt) -> Result<()>;
}

impl<T: PresentationPort + ?Sized> PresentationPort for &mut T {
    fn highlight(&mut self, category: Category, option_id: Option<&str>) {
        (**self).highlight(category, option_id)
    }

    fn show_validation_warning(&mut self, message: &str) {
        (**self).show_validation_warning(message)
    }

    fn prompt_confirmation(&mut self, snapshot: &BookingSnapshot) -> ConfirmationResponse {
        (**self).prompt_confirmation(snapshot)
    }

    fn show_success(&mut self, message: &str) {
        (**self).show_success(message)
    }

    fn show_message(&mut self, message: &str) {
        (**self).show_message(message)
    }

    fn navigate(&mut self, screen: Screen) {
        (**self).navigate(screen)
    }
}

impl<T: BookingSink + ?Sized> BookingSink for &mut T {
    fn submit(&mut self, receipt: &BookingReceipt) -> Result<()> {
        (**self).submit(receipt)
    }
}
