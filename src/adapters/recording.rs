use crate::domain::model::{BookingReceipt, BookingSnapshot, Category, ConfirmationResponse, Screen};
use crate::domain::ports::{BookingSink, PresentationPort};
use crate::utils::error::{BookingError, Result};
use serde::Serialize;
use std::collections::VecDeque;

/// Everything the coordinator asked the presentation layer to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    Highlight {
        category: Category,
        option_id: Option<String>,
    },
    Warning {
        message: String,
    },
    Prompt {
        snapshot: BookingSnapshot,
    },
    Success {
        message: String,
    },
    Message {
        message: String,
    },
    Navigate {
        screen: Screen,
    },
}

/// Headless presentation: keeps a transcript and answers confirmation
/// prompts from a queue (`Pending` once the queue is empty).
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Vec<PresentationEvent>,
    answers: VecDeque<ConfirmationResponse>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = ConfirmationResponse>,
    {
        Self {
            events: Vec::new(),
            answers: answers.into_iter().collect(),
        }
    }

    pub fn queue_answer(&mut self, answer: ConfirmationResponse) {
        self.answers.push_back(answer);
    }

    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresentationEvent::Warning { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<&BookingSnapshot> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresentationEvent::Prompt { snapshot } => Some(snapshot),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<Screen> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresentationEvent::Navigate { screen } => Some(*screen),
                _ => None,
            })
            .collect()
    }

    /// Latest highlight instruction for `category`, as the widgets would
    /// currently show it.
    pub fn highlighted(&self, category: Category) -> Option<&str> {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                PresentationEvent::Highlight {
                    category: c,
                    option_id,
                } if *c == category => Some(option_id.as_deref()),
                _ => None,
            })
            .flatten()
    }
}

impl PresentationPort for RecordingPresenter {
    fn highlight(&mut self, category: Category, option_id: Option<&str>) {
        self.events.push(PresentationEvent::Highlight {
            category,
            option_id: option_id.map(str::to_string),
        });
    }

    fn show_validation_warning(&mut self, message: &str) {
        self.events.push(PresentationEvent::Warning {
            message: message.to_string(),
        });
    }

    fn prompt_confirmation(&mut self, snapshot: &BookingSnapshot) -> ConfirmationResponse {
        self.events.push(PresentationEvent::Prompt {
            snapshot: snapshot.clone(),
        });
        self.answers
            .pop_front()
            .unwrap_or(ConfirmationResponse::Pending)
    }

    fn show_success(&mut self, message: &str) {
        self.events.push(PresentationEvent::Success {
            message: message.to_string(),
        });
    }

    fn show_message(&mut self, message: &str) {
        self.events.push(PresentationEvent::Message {
            message: message.to_string(),
        });
    }

    fn navigate(&mut self, screen: Screen) {
        self.events.push(PresentationEvent::Navigate { screen });
    }
}

/// Keeps accepted bookings in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySink {
    receipts: Vec<BookingReceipt>,
    reject_with: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every submission with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            receipts: Vec::new(),
            reject_with: Some(reason.into()),
        }
    }

    pub fn receipts(&self) -> &[BookingReceipt] {
        &self.receipts
    }
}

impl BookingSink for MemorySink {
    fn submit(&mut self, receipt: &BookingReceipt) -> Result<()> {
        if let Some(reason) = &self.reject_with {
            return Err(BookingError::SubmissionFailed {
                message: reason.clone(),
            });
        }
        self.receipts.push(receipt.clone());
        Ok(())
    }
}
