use crate::core::catalog::OptionCatalog;
use crate::domain::model::{BookingReceipt, BookingSnapshot, Category, ConfirmationResponse, Screen};
use crate::domain::ports::{BookingSink, PresentationPort};
use crate::utils::error::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Line-oriented presentation on a terminal. Write failures are logged and
/// otherwise ignored; the flow keeps running.
pub struct ConsolePresenter<R: BufRead, W: Write> {
    catalog: Arc<OptionCatalog>,
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(catalog: Arc<OptionCatalog>, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn input(&mut self) -> &mut R {
        &mut self.input
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print every option of a category, marking the highlighted one.
    pub fn print_options(&mut self, category: Category, highlighted: Option<&str>) {
        let mut lines = vec![format!("{}:", capitalize(&category.to_string()))];
        for option in self.catalog.options(category) {
            let marker = if highlighted == Some(option.id.as_str()) { ">" } else { " " };
            let mut line = format!("  {} {:<10} {}", marker, option.id, option.name);
            if let Some(capacity) = option.capacity {
                line.push_str(&format!(" • {} passengers", capacity));
            }
            if let Some(price) = option.price {
                line.push_str(&format!("  ₱{:.0}", price));
            }
            lines.push(line);
        }
        self.write_lines(&lines);
    }

    fn display_name(&self, category: Category, option_id: Option<&str>) -> String {
        match option_id {
            Some(id) => self
                .catalog
                .get(category, id)
                .map(|o| o.name.clone())
                .unwrap_or_else(|_| id.to_string()),
            None => "-".to_string(),
        }
    }

    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(e) = writeln!(self.output, "{}", line) {
                tracing::warn!("Console write failed: {}", e);
                return;
            }
        }
        if let Err(e) = self.output.flush() {
            tracing::warn!("Console flush failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> PresentationPort for ConsolePresenter<R, W> {
    fn highlight(&mut self, category: Category, option_id: Option<&str>) {
        let name = self.display_name(category, option_id);
        self.write_lines(&[format!("[{}] {}", category, name)]);
    }

    fn show_validation_warning(&mut self, message: &str) {
        self.write_lines(&[format!("⚠️  {}", message)]);
    }

    fn prompt_confirmation(&mut self, snapshot: &BookingSnapshot) -> ConfirmationResponse {
        let mut lines = vec!["Booking Details:".to_string()];
        if self.json {
            match serde_json::to_string_pretty(snapshot) {
                Ok(json) => lines.push(json),
                Err(e) => tracing::warn!("Snapshot not serializable: {}", e),
            }
        } else {
            for category in Category::ALL {
                lines.push(format!(
                    "  {}: {}",
                    capitalize(&category.to_string()),
                    self.display_name(category, snapshot.get(category))
                ));
            }
        }
        lines.push("Confirm your booking? [y/N]".to_string());
        self.write_lines(&lines);

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => ConfirmationResponse::Pending,
            Ok(_) => match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => ConfirmationResponse::Accepted,
                _ => ConfirmationResponse::Declined,
            },
            Err(e) => {
                tracing::warn!("Could not read confirmation answer: {}", e);
                ConfirmationResponse::Pending
            }
        }
    }

    fn show_success(&mut self, message: &str) {
        self.write_lines(&[format!("✅ {}", message)]);
    }

    fn show_message(&mut self, message: &str) {
        self.write_lines(&[message.to_string()]);
    }

    fn navigate(&mut self, screen: Screen) {
        self.write_lines(&[format!("📱 {} screen", screen)]);
    }
}

/// Hands accepted bookings to the log. Stands in for a driver-matching
/// client.
#[derive(Debug, Default)]
pub struct LogSink;

impl BookingSink for LogSink {
    fn submit(&mut self, receipt: &BookingReceipt) -> Result<()> {
        let payload = serde_json::to_string(receipt)?;
        tracing::info!("📨 Booking submitted: {}", payload);
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
