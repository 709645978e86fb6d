use crate::adapters::command::Command;
use crate::domain::model::ConfirmationResponse;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A recorded sequence of user events, replayed by `booking-script`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script: ScriptInfo,
    /// Console command lines, e.g. `select vehicle moto`.
    pub steps: Vec<String>,
    /// Answers handed out to confirmation prompts, in order.
    #[serde(default)]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub name: String,
    pub description: Option<String>,
    /// Catalog file; the built-in catalog when unset.
    pub catalog: Option<String>,
}

impl ScriptConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn commands(&self) -> Result<Vec<Command>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                Command::parse(step).map_err(|reason| BookingError::InvalidConfigValueError {
                    field: format!("steps[{}]", i),
                    value: step.clone(),
                    reason,
                })
            })
            .collect()
    }

    pub fn responses(&self) -> Result<Vec<ConfirmationResponse>> {
        self.answers
            .iter()
            .enumerate()
            .map(|(i, answer)| match answer.trim().to_ascii_lowercase().as_str() {
                "accept" | "yes" => Ok(ConfirmationResponse::Accepted),
                "decline" | "no" => Ok(ConfirmationResponse::Declined),
                "pending" => Ok(ConfirmationResponse::Pending),
                _ => Err(BookingError::InvalidConfigValueError {
                    field: format!("answers[{}]", i),
                    value: answer.clone(),
                    reason: "Expected accept, decline or pending".to_string(),
                }),
            })
            .collect()
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("script.name", &self.script.name)?;
        if self.steps.is_empty() {
            return Err(BookingError::MissingConfigError {
                field: "steps".to_string(),
            });
        }
        if let Some(catalog) = &self.script.catalog {
            validation::validate_path("script.catalog", catalog)?;
        }
        self.commands()?;
        self.responses()?;
        Ok(())
    }
}
