use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four selectable dimensions of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PickupLocation,
    DropoffLocation,
    VehicleType,
    PaymentMethod,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::PickupLocation,
        Category::DropoffLocation,
        Category::VehicleType,
        Category::PaymentMethod,
    ];

    /// Key used in catalog files and console commands.
    pub fn key(self) -> &'static str {
        match self {
            Category::PickupLocation => "pickup_location",
            Category::DropoffLocation => "dropoff_location",
            Category::VehicleType => "vehicle_type",
            Category::PaymentMethod => "payment_method",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "pickup_location" | "pickup" => Some(Category::PickupLocation),
            "dropoff_location" | "dropoff" | "drop-off" => Some(Category::DropoffLocation),
            "vehicle_type" | "vehicle" => Some(Category::VehicleType),
            "payment_method" | "payment" => Some(Category::PaymentMethod),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Category::PickupLocation => 0,
            Category::DropoffLocation => 1,
            Category::VehicleType => 2,
            Category::PaymentMethod => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::PickupLocation => "pickup location",
            Category::DropoffLocation => "drop-off location",
            Category::VehicleType => "vehicle type",
            Category::PaymentMethod => "payment method",
        };
        f.write_str(label)
    }
}

/// A single selectable value within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl BookingOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: None,
            description: None,
            capacity: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Immutable read of the current selection across all categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingSnapshot {
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub vehicle: Option<String>,
    pub payment: Option<String>,
}

impl BookingSnapshot {
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::PickupLocation => self.pickup.as_deref(),
            Category::DropoffLocation => self.dropoff.as_deref(),
            Category::VehicleType => self.vehicle.as_deref(),
            Category::PaymentMethod => self.payment.as_deref(),
        }
    }
}

impl fmt::Display for BookingSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "pickup: {}, dropoff: {}, vehicle: {}, payment: {}",
            show(&self.pickup),
            show(&self.dropoff),
            show(&self.vehicle),
            show(&self.payment)
        )
    }
}

/// What the booking sink receives once the rider accepts the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub receipt_id: String,
    pub snapshot: BookingSnapshot,
    /// Static display fare of the chosen vehicle class.
    pub fare: Option<f64>,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    /// The pickup/drop-off, vehicle and payment screen the coordinator drives.
    Booking,
    Messages,
    History,
}

impl Screen {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Screen::Home),
            "booking" | "book" => Some(Screen::Booking),
            "messages" => Some(Screen::Messages),
            "history" => Some(Screen::History),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Screen::Home => "Home",
            Screen::Booking => "Booking",
            Screen::Messages => "Messages",
            Screen::History => "History",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    Selecting,
    ReadyToConfirm,
    Confirming,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowState::Idle => "idle",
            FlowState::Selecting => "selecting",
            FlowState::ReadyToConfirm => "ready to confirm",
            FlowState::Confirming => "confirming",
        };
        f.write_str(label)
    }
}

/// Answer from the presentation layer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Accepted,
    Declined,
    /// The dialog is asynchronous; the UI reports the answer later.
    Pending,
}
