use crate::utils::error::{BookingError, Result};
use regex::Regex;
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_.-]*$";

pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(IDENTIFIER_PATTERN).map_err(|e| BookingError::ConfigValidationError {
        field: field_name.to_string(),
        message: format!("Identifier pattern failed to compile: {}", e),
    })?;

    if !re.is_match(value) {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Identifiers use letters, digits, '_', '.' or '-' and start with a letter or digit"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_price(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Price must be a non-negative number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(BookingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Value appears more than once".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("id", "PUP_Main").is_ok());
        assert!(validate_identifier("id", "car-4.seater").is_ok());
        assert!(validate_identifier("id", "").is_err());
        assert!(validate_identifier("id", "_hidden").is_err());
        assert!(validate_identifier("id", "PUP Main").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", 0.0).is_ok());
        assert!(validate_price("price", 75.0).is_ok());
        assert!(validate_price("price", -1.0).is_err());
        assert!(validate_price("price", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("required", ["a", "b"]).is_ok());
        assert!(validate_unique("required", ["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("catalog", "config/catalog.toml").is_ok());
        assert!(validate_path("catalog", "").is_err());
        assert!(validate_path("catalog", "bad\0path").is_err());
    }
}
