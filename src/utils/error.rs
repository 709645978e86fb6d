use crate::domain::model::{Category, FlowState};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Option '{option_id}' is not offered for {category}")]
    InvalidOption { category: Category, option_id: String },

    #[error("Unknown option '{option_id}' in {category}")]
    UnknownOption { category: Category, option_id: String },

    #[error("Duplicate option '{option_id}' in {category}")]
    DuplicateOption { category: Category, option_id: String },

    #[error("Cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: FlowState,
    },

    #[error("Booking submission failed: {message}")]
    SubmissionFailed { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Selection,
    Transition,
    Submission,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::UnknownOption { .. } | BookingError::DuplicateOption { .. } => {
                ErrorCategory::Catalog
            }
            BookingError::InvalidOption { .. } => ErrorCategory::Selection,
            BookingError::InvalidTransition { .. } => ErrorCategory::Transition,
            BookingError::SubmissionFailed { .. } => ErrorCategory::Submission,
            BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Selection and transition errors are recovered locally; catalog and
    /// configuration errors abort startup.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection | ErrorCategory::Transition => ErrorSeverity::Low,
            ErrorCategory::Submission => ErrorSeverity::Medium,
            ErrorCategory::Catalog | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BookingError::InvalidOption { category, .. } => {
                format!("Pick one of the listed {} options", category)
            }
            BookingError::UnknownOption { category, .. } => format!(
                "Check that every default and initial id exists under [catalog.{}]",
                category.key()
            ),
            BookingError::DuplicateOption { category, .. } => format!(
                "Give every option under [catalog.{}] a unique id",
                category.key()
            ),
            BookingError::InvalidTransition { .. } => {
                "Wait for the current confirmation prompt to be answered".to_string()
            }
            BookingError::SubmissionFailed { .. } => "Try confirming the booking again".to_string(),
            BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => {
                "Fix the catalog file and restart".to_string()
            }
            BookingError::IoError(_) => "Check that the file exists and is readable".to_string(),
            BookingError::SerializationError(_) => "Check the data format".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Catalog | ErrorCategory::Configuration => {
                format!("The booking catalog could not be loaded: {}", self)
            }
            ErrorCategory::Selection => format!("That choice is not available: {}", self),
            ErrorCategory::Transition => format!("That action is not possible right now: {}", self),
            ErrorCategory::Submission => format!("Your booking was not sent: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
