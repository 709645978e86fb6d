use crate::core::booking_state::BookingState;
use crate::core::catalog::OptionCatalog;
use crate::core::deferred::DeferredDefaults;
use crate::core::highlight::HighlightPlan;
use crate::core::router::ScreenRouter;
use crate::domain::model::{
    BookingReceipt, BookingSnapshot, Category, ConfirmationResponse, FlowState, Screen,
};
use crate::domain::ports::{BookingSink, PresentationPort};
use crate::utils::error::{BookingError, Result};
use chrono::Utc;
use std::sync::Arc;

pub const LOCATIONS_WARNING: &str = "Please select both Pickup and Drop-off locations.";
pub const VEHICLE_WARNING: &str = "Please select a vehicle type before booking.";
pub const PAYMENT_WARNING: &str = "Please select a payment method before booking.";

/// Rules that vary between booking flows.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPolicy {
    pub required: Vec<Category>,
    pub success_message: String,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            required: Category::ALL.to_vec(),
            success_message: "Booking confirmed successfully!".to_string(),
        }
    }
}

/// What `request_confirm` led to.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// A validation warning was shown for these categories.
    Incomplete(Vec<Category>),
    /// The prompt is up and the UI will answer later.
    AwaitingAnswer,
    Booked(BookingReceipt),
    Declined,
}

/// Drives one booking flow: owns its state, turns user events into state
/// transitions and tells the presentation layer what to show.
pub struct BookingCoordinator<P: PresentationPort, S: BookingSink> {
    state: BookingState,
    flow: FlowState,
    policy: BookingPolicy,
    presenter: P,
    sink: S,
    router: ScreenRouter,
    deferred: DeferredDefaults,
    rendered: HighlightPlan,
    touched: bool,
    receipts_issued: u64,
}

impl<P: PresentationPort, S: BookingSink> BookingCoordinator<P, S> {
    pub fn new(catalog: Arc<OptionCatalog>, presenter: P, sink: S) -> Self {
        Self::with_policy(catalog, BookingPolicy::default(), presenter, sink)
    }

    /// Catalog initial highlights are scheduled, not applied; call
    /// `apply_deferred` once the screen is up.
    pub fn with_policy(
        catalog: Arc<OptionCatalog>,
        policy: BookingPolicy,
        presenter: P,
        sink: S,
    ) -> Self {
        let state = BookingState::with_required(catalog, &policy.required);

        let mut coordinator = Self {
            state,
            flow: FlowState::Idle,
            policy,
            presenter,
            sink,
            router: ScreenRouter::new(Screen::Booking),
            deferred: DeferredDefaults::new(),
            rendered: HighlightPlan::default(),
            touched: false,
            receipts_issued: 0,
        };
        coordinator.schedule_initial_highlights();
        // a policy may be satisfied by defaults alone
        coordinator.settle();
        coordinator
    }

    pub fn flow_state(&self) -> FlowState {
        self.flow
    }

    pub fn booking(&self) -> &BookingState {
        &self.state
    }

    pub fn current(&self, category: Category) -> Option<&str> {
        self.state.current(category)
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        self.state.snapshot()
    }

    pub fn highlight_plan(&self) -> HighlightPlan {
        HighlightPlan::from_state(&self.state)
    }

    pub fn current_screen(&self) -> Screen {
        self.router.current()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (P, S) {
        (self.presenter, self.sink)
    }

    /// Push the full highlight set to the presentation layer, e.g. when the
    /// booking screen is first drawn.
    pub fn render(&mut self) {
        for category in Category::ALL {
            self.presenter
                .highlight(category, self.state.current(category));
        }
        self.rendered = HighlightPlan::from_state(&self.state);
    }

    pub fn select_option(&mut self, category: Category, option_id: &str) -> Result<()> {
        self.ensure_not(FlowState::Confirming, "select an option")?;

        if let Err(e) = self.state.select(category, option_id) {
            tracing::warn!("Rejected selection: {}", e);
            return Err(e);
        }
        self.deferred.touch(category);
        self.touched = true;
        tracing::debug!("Selected {} = {}", category, option_id);

        self.sync_highlights(Some(category));
        self.settle();
        Ok(())
    }

    pub fn schedule_default(&mut self, category: Category, option_id: impl Into<String>) {
        self.deferred.schedule(category, option_id);
    }

    /// Apply pending defaults whose category has not changed since they were
    /// scheduled. Held back while a confirmation prompt is open. Returns the
    /// number applied.
    pub fn apply_deferred(&mut self) -> usize {
        if self.flow == FlowState::Confirming || !self.deferred.is_pending() {
            return 0;
        }

        let (apply, superseded) = self.deferred.take();
        for skipped in &superseded {
            tracing::debug!(
                "Deferred default {} = {} superseded by a newer selection",
                skipped.category,
                skipped.option_id
            );
        }

        let mut applied = 0;
        for pending in apply {
            match self.state.select(pending.category, &pending.option_id) {
                Ok(()) => {
                    self.touched = true;
                    self.sync_highlights(Some(pending.category));
                    applied += 1;
                }
                Err(e) => tracing::warn!("Deferred default dropped: {}", e),
            }
        }

        if applied > 0 {
            self.settle();
        }
        applied
    }

    pub fn request_confirm(&mut self) -> Result<ConfirmOutcome> {
        self.ensure_not(FlowState::Confirming, "request confirmation")?;

        let missing = self.state.missing();
        if !missing.is_empty() {
            tracing::info!("Confirmation blocked, missing: {:?}", missing);
            self.presenter
                .show_validation_warning(validation_message(&missing));
            return Ok(ConfirmOutcome::Incomplete(missing));
        }

        let snapshot = self.state.snapshot();
        self.flow = FlowState::Confirming;
        tracing::info!("Awaiting confirmation of {}", snapshot);

        match self.presenter.prompt_confirmation(&snapshot) {
            ConfirmationResponse::Accepted => self.on_confirm_accepted().map(ConfirmOutcome::Booked),
            ConfirmationResponse::Declined => {
                self.on_confirm_declined()?;
                Ok(ConfirmOutcome::Declined)
            }
            ConfirmationResponse::Pending => Ok(ConfirmOutcome::AwaitingAnswer),
        }
    }

    pub fn on_confirm_accepted(&mut self) -> Result<BookingReceipt> {
        self.ensure(FlowState::Confirming, "accept the booking")?;

        let receipt = self.issue_receipt();
        if let Err(e) = self.sink.submit(&receipt) {
            tracing::error!("Booking {} not submitted: {}", receipt.receipt_id, e);
            self.presenter
                .show_validation_warning(&format!("Booking could not be submitted: {}", e));
            self.flow = self.resting_state();
            return Err(BookingError::SubmissionFailed {
                message: e.to_string(),
            });
        }

        tracing::info!("Booking {} confirmed", receipt.receipt_id);

        self.presenter.show_success(&self.policy.success_message);
        self.reset_flow();
        self.state.mark_confirmed();
        self.router.jump_to(Screen::Home, &mut self.presenter);
        Ok(receipt)
    }

    pub fn on_confirm_declined(&mut self) -> Result<()> {
        self.ensure(FlowState::Confirming, "decline the booking")?;

        self.flow = if self.state.is_complete() {
            FlowState::ReadyToConfirm
        } else {
            FlowState::Selecting
        };
        tracing::info!("Booking declined, back to {}", self.flow);
        Ok(())
    }

    /// Drop the booking in progress. A no-op when nothing is selected.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_not(FlowState::Confirming, "cancel")?;
        if !self.touched && !self.state.has_user_selection() {
            return Ok(());
        }

        self.reset_flow();
        self.presenter.show_message("Booking cancelled.");
        tracing::info!("Booking cancelled");
        Ok(())
    }

    /// Bottom navigation. Leaving the booking screen tears the current
    /// booking down; entering it schedules the initial highlights again.
    pub fn navigate_to(&mut self, screen: Screen) -> Result<bool> {
        self.ensure_not(FlowState::Confirming, "navigate away")?;

        let leaving_booking = self.router.current() == Screen::Booking;
        let moved = self.router.go_to(screen, &mut self.presenter);
        if !moved {
            return Ok(false);
        }
        if leaving_booking {
            tracing::debug!("Booking screen closed, discarding selections");
            self.reset_flow();
        }
        if screen == Screen::Booking {
            self.schedule_initial_highlights();
        }
        Ok(true)
    }

    fn schedule_initial_highlights(&mut self) {
        let catalog = Arc::clone(self.state.catalog());
        for category in Category::ALL {
            if let Some(initial) = catalog.initial_highlight_for(category) {
                self.deferred.schedule(category, initial);
            }
        }
    }

    fn reset_flow(&mut self) {
        self.state.reset();
        self.deferred.touch_all();
        self.touched = false;
        self.sync_highlights(None);
        self.settle();
    }

    /// Re-highlight every category whose emphasis changed since the last
    /// render, plus `force` even when it did not.
    fn sync_highlights(&mut self, force: Option<Category>) {
        let plan = HighlightPlan::from_state(&self.state);
        let mut categories = plan.changed_categories(&self.rendered);
        if let Some(category) = force {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        for category in categories {
            self.presenter
                .highlight(category, self.state.current(category));
        }
        self.rendered = plan;
    }

    fn resting_state(&self) -> FlowState {
        if self.state.is_complete() {
            FlowState::ReadyToConfirm
        } else if self.touched {
            FlowState::Selecting
        } else {
            FlowState::Idle
        }
    }

    fn settle(&mut self) {
        let next = self.resting_state();
        if next != self.flow {
            tracing::debug!("Flow {} -> {}", self.flow, next);
            self.flow = next;
        }
    }

    fn issue_receipt(&mut self) -> BookingReceipt {
        self.receipts_issued += 1;
        let confirmed_at = Utc::now();
        let snapshot = self.state.snapshot();
        let fare = snapshot
            .vehicle
            .as_deref()
            .and_then(|id| self.state.catalog().get(Category::VehicleType, id).ok())
            .and_then(|option| option.price);

        BookingReceipt {
            receipt_id: format!(
                "BK{}-{:04}",
                confirmed_at.format("%Y%m%d%H%M%S"),
                self.receipts_issued
            ),
            snapshot,
            fare,
            confirmed_at,
        }
    }

    fn ensure(&self, expected: FlowState, operation: &'static str) -> Result<()> {
        if self.flow == expected {
            return Ok(());
        }
        let err = BookingError::InvalidTransition {
            operation,
            state: self.flow,
        };
        tracing::warn!("Ignored event: {}", err);
        Err(err)
    }

    fn ensure_not(&self, forbidden: FlowState, operation: &'static str) -> Result<()> {
        if self.flow != forbidden {
            return Ok(());
        }
        let err = BookingError::InvalidTransition {
            operation,
            state: self.flow,
        };
        tracing::warn!("Ignored event: {}", err);
        Err(err)
    }
}

/// One warning per failed confirmation: locations first, then vehicle, then
/// payment.
pub fn validation_message(missing: &[Category]) -> &'static str {
    if missing.contains(&Category::PickupLocation) || missing.contains(&Category::DropoffLocation) {
        LOCATIONS_WARNING
    } else if missing.contains(&Category::VehicleType) {
        VEHICLE_WARNING
    } else {
        PAYMENT_WARNING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BookingOption;

    #[derive(Default)]
    struct NullPresenter {
        warnings: usize,
        highlights: Vec<(Category, Option<String>)>,
        answer: Option<ConfirmationResponse>,
    }

    impl PresentationPort for NullPresenter {
        fn highlight(&mut self, category: Category, option_id: Option<&str>) {
            self.highlights.push((category, option_id.map(str::to_string)));
        }

        fn show_validation_warning(&mut self, _message: &str) {
            self.warnings += 1;
        }

        fn prompt_confirmation(&mut self, _snapshot: &BookingSnapshot) -> ConfirmationResponse {
            self.answer.unwrap_or(ConfirmationResponse::Pending)
        }

        fn show_success(&mut self, _message: &str) {}

        fn navigate(&mut self, _screen: Screen) {}
    }

    #[derive(Default)]
    struct CountingSink {
        submitted: usize,
    }

    impl BookingSink for CountingSink {
        fn submit(&mut self, _receipt: &BookingReceipt) -> Result<()> {
            self.submitted += 1;
            Ok(())
        }
    }

    fn coordinator() -> BookingCoordinator<NullPresenter, CountingSink> {
        let catalog = OptionCatalog::builder()
            .option(Category::PickupLocation, BookingOption::new("PUP_Main", "PUP Main"))
            .option(Category::DropoffLocation, BookingOption::new("PUP_LHS", "PUP LHS"))
            .option(Category::VehicleType, BookingOption::new("moto", "Enavroom-vroom").with_price(75.0))
            .option(Category::VehicleType, BookingOption::new("car4", "Car (4-seater)").with_price(250.0))
            .option(Category::PaymentMethod, BookingOption::new("cash", "Cash"))
            .default_option(Category::PaymentMethod, "cash")
            .build()
            .unwrap();
        BookingCoordinator::new(Arc::new(catalog), NullPresenter::default(), CountingSink::default())
    }

    fn fill(c: &mut BookingCoordinator<NullPresenter, CountingSink>) {
        c.select_option(Category::PickupLocation, "PUP_Main").unwrap();
        c.select_option(Category::DropoffLocation, "PUP_LHS").unwrap();
        c.select_option(Category::VehicleType, "moto").unwrap();
    }

    #[test]
    fn test_flow_advances_with_selections() {
        let mut c = coordinator();
        assert_eq!(c.flow_state(), FlowState::Idle);

        c.select_option(Category::PickupLocation, "PUP_Main").unwrap();
        assert_eq!(c.flow_state(), FlowState::Selecting);

        c.select_option(Category::DropoffLocation, "PUP_LHS").unwrap();
        c.select_option(Category::VehicleType, "moto").unwrap();
        assert_eq!(c.flow_state(), FlowState::ReadyToConfirm);
    }

    #[test]
    fn test_invalid_option_changes_nothing() {
        let mut c = coordinator();
        c.select_option(Category::VehicleType, "moto").unwrap();
        let highlights_before = c.presenter().highlights.len();

        let err = c.select_option(Category::VehicleType, "jeepney").unwrap_err();
        assert!(matches!(err, BookingError::InvalidOption { .. }));
        assert_eq!(c.current(Category::VehicleType), Some("moto"));
        assert_eq!(c.presenter().highlights.len(), highlights_before);
    }

    #[test]
    fn test_pending_prompt_blocks_other_events() {
        let mut c = coordinator();
        fill(&mut c);

        assert_eq!(c.request_confirm().unwrap(), ConfirmOutcome::AwaitingAnswer);
        assert_eq!(c.flow_state(), FlowState::Confirming);

        assert!(matches!(
            c.request_confirm(),
            Err(BookingError::InvalidTransition { .. })
        ));
        assert!(c.select_option(Category::VehicleType, "car4").is_err());
        assert!(c.cancel().is_err());
        assert_eq!(c.current(Category::VehicleType), Some("moto"));
        assert_eq!(c.flow_state(), FlowState::Confirming);
    }

    #[test]
    fn test_answers_outside_prompt_are_rejected() {
        let mut c = coordinator();
        assert!(c.on_confirm_accepted().is_err());
        assert!(c.on_confirm_declined().is_err());
        assert_eq!(c.flow_state(), FlowState::Idle);
        assert_eq!(c.sink().submitted, 0);
    }

    #[test]
    fn test_modal_accept_books_and_resets() {
        let mut c = coordinator();
        c.presenter_mut().answer = Some(ConfirmationResponse::Accepted);
        fill(&mut c);

        match c.request_confirm().unwrap() {
            ConfirmOutcome::Booked(receipt) => {
                assert_eq!(receipt.fare, Some(75.0));
                assert!(receipt.receipt_id.ends_with("-0001"));
            }
            other => panic!("expected booking, got {:?}", other),
        }
        assert_eq!(c.flow_state(), FlowState::Idle);
        assert_eq!(c.current(Category::VehicleType), None);
        assert_eq!(c.current(Category::PaymentMethod), Some("cash"));
        assert_eq!(c.current_screen(), Screen::Home);
        assert_eq!(c.sink().submitted, 1);
        assert!(c.booking().is_confirmed());
    }

    #[test]
    fn test_cancel_resets_selection() {
        let mut c = coordinator();
        c.select_option(Category::PickupLocation, "PUP_Main").unwrap();
        c.cancel().unwrap();
        assert_eq!(c.flow_state(), FlowState::Idle);
        assert_eq!(c.current(Category::PickupLocation), None);

        // nothing to cancel
        c.cancel().unwrap();
        assert_eq!(c.flow_state(), FlowState::Idle);
    }

    #[test]
    fn test_validation_message_priority() {
        assert_eq!(
            validation_message(&[Category::DropoffLocation, Category::VehicleType]),
            LOCATIONS_WARNING
        );
        assert_eq!(validation_message(&[Category::VehicleType]), VEHICLE_WARNING);
        assert_eq!(validation_message(&[Category::PaymentMethod]), PAYMENT_WARNING);
    }
}
