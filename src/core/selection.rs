use crate::core::catalog::OptionCatalog;
use crate::domain::model::Category;
use crate::utils::error::{BookingError, Result};
use std::sync::Arc;

/// Single-choice register for one category, bound to the catalog it selects
/// from. Holds at most one id, and that id always exists in the catalog.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    category: Category,
    catalog: Arc<OptionCatalog>,
    current: Option<String>,
}

impl SelectionSet {
    pub fn new(category: Category, catalog: Arc<OptionCatalog>) -> Self {
        Self {
            category,
            catalog,
            current: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Replaces the active id. Nothing changes when `option_id` is not in
    /// the catalog.
    pub fn select(&mut self, option_id: &str) -> Result<()> {
        if !self.catalog.contains(self.category, option_id) {
            return Err(BookingError::InvalidOption {
                category: self.category,
                option_id: option_id.to_string(),
            });
        }
        self.current = Some(option_id.to_string());
        Ok(())
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BookingOption;

    fn payment_set() -> SelectionSet {
        let catalog = OptionCatalog::builder()
            .option(Category::PaymentMethod, BookingOption::new("cash", "Cash"))
            .option(Category::PaymentMethod, BookingOption::new("wallet", "Wallet"))
            .build()
            .unwrap();
        SelectionSet::new(Category::PaymentMethod, Arc::new(catalog))
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut set = payment_set();
        assert_eq!(set.current(), None);

        set.select("cash").unwrap();
        assert_eq!(set.current(), Some("cash"));

        set.select("wallet").unwrap();
        assert_eq!(set.current(), Some("wallet"));
    }

    #[test]
    fn test_invalid_select_leaves_state() {
        let mut set = payment_set();
        set.select("wallet").unwrap();

        let err = set.select("gcash").unwrap_err();
        assert!(matches!(err, BookingError::InvalidOption { .. }));
        assert_eq!(set.current(), Some("wallet"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut set = payment_set();
        set.clear();
        set.clear();
        assert!(!set.is_selected());

        set.select("cash").unwrap();
        set.clear();
        set.clear();
        assert_eq!(set.current(), None);
    }
}
