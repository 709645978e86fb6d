use crate::domain::model::{BookingOption, Category};
use crate::utils::error::{BookingError, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
struct CategoryOptions {
    options: Vec<BookingOption>,
    default: Option<String>,
    initial: Option<String>,
}

/// Ordered, read-only list of options for every category.
///
/// Order is insertion order: it drives display order and breaks ties when a
/// default has to be picked.
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    categories: [CategoryOptions; 4],
}

impl OptionCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The catalog of the stock app: campus locations, three vehicle classes,
    /// cash and wallet payment.
    pub fn builtin() -> Result<Self> {
        crate::config::toml_config::CatalogConfig::builtin()?.to_catalog()
    }

    pub fn options(&self, category: Category) -> std::slice::Iter<'_, BookingOption> {
        self.slot(category).options.iter()
    }

    pub fn len(&self, category: Category) -> usize {
        self.slot(category).options.len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.slot(category).options.is_empty()
    }

    pub fn get(&self, category: Category, option_id: &str) -> Result<&BookingOption> {
        self.slot(category)
            .options
            .iter()
            .find(|o| o.id == option_id)
            .ok_or_else(|| BookingError::UnknownOption {
                category,
                option_id: option_id.to_string(),
            })
    }

    pub fn contains(&self, category: Category, option_id: &str) -> bool {
        self.slot(category).options.iter().any(|o| o.id == option_id)
    }

    /// Option a category falls back to instead of "none selected".
    pub fn default_for(&self, category: Category) -> Option<&str> {
        self.slot(category).default.as_deref()
    }

    /// Option pre-selected once when a booking flow opens.
    pub fn initial_highlight_for(&self, category: Category) -> Option<&str> {
        self.slot(category).initial.as_deref()
    }

    fn slot(&self, category: Category) -> &CategoryOptions {
        &self.categories[category.index()]
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    categories: [CategoryOptions; 4],
}

impl CatalogBuilder {
    pub fn option(mut self, category: Category, option: BookingOption) -> Self {
        self.categories[category.index()].options.push(option);
        self
    }

    pub fn options<I>(mut self, category: Category, options: I) -> Self
    where
        I: IntoIterator<Item = BookingOption>,
    {
        self.categories[category.index()].options.extend(options);
        self
    }

    pub fn default_option(mut self, category: Category, option_id: impl Into<String>) -> Self {
        self.categories[category.index()].default = Some(option_id.into());
        self
    }

    pub fn initial_highlight(mut self, category: Category, option_id: impl Into<String>) -> Self {
        self.categories[category.index()].initial = Some(option_id.into());
        self
    }

    /// Fails on the first duplicate id, or on a default/initial id that is
    /// not one of the category's options.
    pub fn build(self) -> Result<OptionCatalog> {
        for category in Category::ALL {
            let slot = &self.categories[category.index()];

            let mut seen = HashSet::new();
            for option in &slot.options {
                if !seen.insert(option.id.as_str()) {
                    return Err(BookingError::DuplicateOption {
                        category,
                        option_id: option.id.clone(),
                    });
                }
            }

            for id in slot.default.iter().chain(slot.initial.iter()) {
                if !seen.contains(id.as_str()) {
                    return Err(BookingError::UnknownOption {
                        category,
                        option_id: id.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            "Catalog built: {} pickup, {} dropoff, {} vehicle, {} payment options",
            self.categories[0].options.len(),
            self.categories[1].options.len(),
            self.categories[2].options.len(),
            self.categories[3].options.len()
        );

        Ok(OptionCatalog {
            categories: self.categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicles() -> Vec<BookingOption> {
        vec![
            BookingOption::new("moto", "Enavroom-vroom").with_price(75.0),
            BookingOption::new("car4", "Car (4-seater)").with_price(250.0),
            BookingOption::new("car6", "Car (6-seater)").with_price(450.0),
        ]
    }

    #[test]
    fn test_options_keep_insertion_order() {
        let catalog = OptionCatalog::builder()
            .options(Category::VehicleType, vehicles())
            .build()
            .unwrap();

        let ids: Vec<&str> = catalog
            .options(Category::VehicleType)
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["moto", "car4", "car6"]);

        // restartable
        assert_eq!(catalog.options(Category::VehicleType).count(), 3);
        assert!(catalog.is_empty(Category::PaymentMethod));
    }

    #[test]
    fn test_get_unknown_option() {
        let catalog = OptionCatalog::builder()
            .options(Category::VehicleType, vehicles())
            .build()
            .unwrap();

        assert_eq!(
            catalog.get(Category::VehicleType, "car4").unwrap().price,
            Some(250.0)
        );
        assert!(matches!(
            catalog.get(Category::VehicleType, "bus"),
            Err(BookingError::UnknownOption { .. })
        ));
        // ids are scoped to their category
        assert!(catalog.get(Category::PaymentMethod, "moto").is_err());
    }

    #[test]
    fn test_duplicate_ids_fail_fast() {
        let result = OptionCatalog::builder()
            .options(Category::VehicleType, vehicles())
            .option(Category::VehicleType, BookingOption::new("moto", "Another moto"))
            .build();

        match result {
            Err(BookingError::DuplicateOption {
                category,
                option_id,
            }) => {
                assert_eq!(category, Category::VehicleType);
                assert_eq!(option_id, "moto");
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_same_id_allowed_across_categories() {
        let catalog = OptionCatalog::builder()
            .option(Category::PickupLocation, BookingOption::new("PUP_Main", "PUP Main"))
            .option(Category::DropoffLocation, BookingOption::new("PUP_Main", "PUP Main"))
            .build();
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_default_must_exist() {
        let result = OptionCatalog::builder()
            .option(Category::PaymentMethod, BookingOption::new("cash", "Cash"))
            .default_option(Category::PaymentMethod, "card")
            .build();
        assert!(matches!(result, Err(BookingError::UnknownOption { .. })));

        let catalog = OptionCatalog::builder()
            .option(Category::PaymentMethod, BookingOption::new("cash", "Cash"))
            .default_option(Category::PaymentMethod, "cash")
            .build()
            .unwrap();
        assert_eq!(catalog.default_for(Category::PaymentMethod), Some("cash"));
        assert_eq!(catalog.default_for(Category::VehicleType), None);
    }
}
