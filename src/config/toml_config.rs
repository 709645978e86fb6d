use crate::core::catalog::OptionCatalog;
use crate::core::coordinator::BookingPolicy;
use crate::domain::model::{BookingOption, Category};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../config/catalog.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CategoriesConfig,
    pub booking: Option<BookingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(default)]
    pub pickup_location: CategoryConfig,
    #[serde(default)]
    pub dropoff_location: CategoryConfig,
    #[serde(default)]
    pub vehicle_type: CategoryConfig,
    #[serde(default)]
    pub payment_method: CategoryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Persistent default the category resets to.
    pub default: Option<String>,
    /// Selected once when the booking screen opens.
    pub initial: Option<String>,
    #[serde(default)]
    pub options: Vec<BookingOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    pub required: Option<Vec<String>>,
    pub success_message: Option<String>,
}

impl CategoriesConfig {
    pub fn get(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::PickupLocation => &self.pickup_location,
            Category::DropoffLocation => &self.dropoff_location,
            Category::VehicleType => &self.vehicle_type,
            Category::PaymentMethod => &self.payment_method,
        }
    }
}

impl CatalogConfig {
    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Replace `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        for category in Category::ALL {
            let section = self.catalog.get(category);
            let key = category.key();

            for (i, option) in section.options.iter().enumerate() {
                let field = format!("catalog.{}.options[{}]", key, i);
                validation::validate_identifier(&format!("{}.id", field), &option.id)?;
                validation::validate_non_empty_string(&format!("{}.name", field), &option.name)?;
                if let Some(price) = option.price {
                    validation::validate_price(&format!("{}.price", field), price)?;
                }
                if let Some(capacity) = option.capacity {
                    validation::validate_positive_number(&format!("{}.capacity", field), capacity, 1)?;
                }
            }
        }

        let required = self.required_categories()?;
        for category in &required {
            if self.catalog.get(*category).options.is_empty() {
                return Err(BookingError::ConfigValidationError {
                    field: format!("catalog.{}", category.key()),
                    message: "Required category has no options".to_string(),
                });
            }
        }

        if let Some(message) = self.booking.as_ref().and_then(|b| b.success_message.as_ref()) {
            validation::validate_non_empty_string("booking.success_message", message)?;
        }

        Ok(())
    }

    /// Required categories in category order. All four when unset.
    pub fn required_categories(&self) -> Result<Vec<Category>> {
        let Some(names) = self.booking.as_ref().and_then(|b| b.required.as_ref()) else {
            return Ok(Category::ALL.to_vec());
        };

        validation::validate_unique("booking.required", names.iter().map(String::as_str))?;

        let mut categories = names
            .iter()
            .map(|name| {
                Category::from_key(name).ok_or_else(|| BookingError::InvalidConfigValueError {
                    field: "booking.required".to_string(),
                    value: name.clone(),
                    reason: format!(
                        "Unknown category. Valid categories: {}",
                        Category::ALL.map(Category::key).join(", ")
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        categories.sort();
        Ok(categories)
    }

    pub fn policy(&self) -> Result<BookingPolicy> {
        let mut policy = BookingPolicy {
            required: self.required_categories()?,
            ..BookingPolicy::default()
        };
        if let Some(message) = self.booking.as_ref().and_then(|b| b.success_message.clone()) {
            policy.success_message = message;
        }
        Ok(policy)
    }

    /// Build the read-only catalog. Duplicate ids and dangling
    /// default/initial ids fail here.
    pub fn to_catalog(&self) -> Result<OptionCatalog> {
        let mut builder = OptionCatalog::builder();
        for category in Category::ALL {
            let section = self.catalog.get(category);
            builder = builder.options(category, section.options.iter().cloned());
            if let Some(default) = &section.default {
                builder = builder.default_option(category, default.clone());
            }
            if let Some(initial) = &section.initial {
                builder = builder.initial_highlight(category, initial.clone());
            }
        }
        builder.build()
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL_CATALOG: &str = r#"
[catalog.pickup_location]
options = [{ id = "PUP_Main", name = "PUP Main" }]

[catalog.dropoff_location]
options = [{ id = "PUP_LHS", name = "PUP LHS" }]

[catalog.vehicle_type]
options = [{ id = "moto", name = "Enavroom-vroom", price = 75, capacity = 1 }]

[catalog.payment_method]
default = "cash"
options = [{ id = "cash", name = "Cash" }]
"#;

    #[test]
    fn test_parse_basic_catalog() {
        let config = CatalogConfig::from_toml_str(SMALL_CATALOG).unwrap();
        assert!(config.validate().is_ok());

        let catalog = config.to_catalog().unwrap();
        let moto = catalog.get(Category::VehicleType, "moto").unwrap();
        assert_eq!(moto.price, Some(75.0));
        assert_eq!(moto.capacity, Some(1));
        assert_eq!(catalog.default_for(Category::PaymentMethod), Some("cash"));

        let policy = config.policy().unwrap();
        assert_eq!(policy.required, Category::ALL.to_vec());
    }

    #[test]
    fn test_builtin_catalog() {
        let config = CatalogConfig::builtin().unwrap();
        assert!(config.validate().is_ok());

        let catalog = config.to_catalog().unwrap();
        assert_eq!(catalog.len(Category::PickupLocation), 7);
        assert_eq!(catalog.len(Category::VehicleType), 3);
        assert_eq!(catalog.initial_highlight_for(Category::VehicleType), Some("moto"));
        assert_eq!(
            config.policy().unwrap().success_message,
            "Enavroom booked successfully!"
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RIDE_BOOKING_TEST_DEFAULT_PAYMENT", "wallet");

        let toml_content = r#"
[catalog.payment_method]
default = "${RIDE_BOOKING_TEST_DEFAULT_PAYMENT}"
options = [{ id = "cash", name = "Cash" }, { id = "wallet", name = "Wallet" }]

[booking]
required = ["payment_method"]
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog.payment_method.default.as_deref(), Some("wallet"));

        std::env::remove_var("RIDE_BOOKING_TEST_DEFAULT_PAYMENT");
    }

    #[test]
    fn test_duplicate_option_rejected_at_build() {
        let toml_content = r#"
[catalog.vehicle_type]
options = [{ id = "moto", name = "Moto" }, { id = "moto", name = "Moto again" }]

[booking]
required = ["vehicle_type"]
"#;
        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.to_catalog(),
            Err(BookingError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let bad_price = SMALL_CATALOG.replace("price = 75", "price = -5");
        let config = CatalogConfig::from_toml_str(&bad_price).unwrap();
        assert!(config.validate().is_err());

        let bad_required = format!("{}\n[booking]\nrequired = [\"luggage\"]\n", SMALL_CATALOG);
        let config = CatalogConfig::from_toml_str(&bad_required).unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::InvalidConfigValueError { .. })
        ));

        let empty_required = r#"
[catalog.pickup_location]
options = []
"#;
        let config = CatalogConfig::from_toml_str(empty_required).unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SMALL_CATALOG.as_bytes()).unwrap();

        let config = CatalogConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog.pickup_location.options[0].id, "PUP_Main");
    }

    #[test]
    fn test_missing_file() {
        let result = CatalogConfig::from_file("/definitely/not/here/catalog.toml");
        assert!(matches!(result, Err(BookingError::IoError(_))));
    }
}
