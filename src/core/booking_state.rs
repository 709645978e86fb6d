use crate::core::catalog::OptionCatalog;
use crate::core::selection::SelectionSet;
use crate::domain::model::{BookingSnapshot, Category};
use crate::utils::error::Result;
use std::sync::Arc;

/// One selection register per category plus the completeness rules.
#[derive(Debug, Clone)]
pub struct BookingState {
    catalog: Arc<OptionCatalog>,
    selections: [SelectionSet; 4],
    required: Vec<Category>,
    confirmed: bool,
}

impl BookingState {
    /// Every category is required. Categories with a catalog default start
    /// on that default.
    pub fn new(catalog: Arc<OptionCatalog>) -> Self {
        Self::with_required(catalog, &Category::ALL)
    }

    pub fn with_required(catalog: Arc<OptionCatalog>, required: &[Category]) -> Self {
        let selections = Category::ALL.map(|c| SelectionSet::new(c, Arc::clone(&catalog)));
        let mut required = required.to_vec();
        required.sort();
        required.dedup();

        let mut state = Self {
            catalog,
            selections,
            required,
            confirmed: false,
        };
        state.reset();
        state
    }

    pub fn catalog(&self) -> &Arc<OptionCatalog> {
        &self.catalog
    }

    pub fn required(&self) -> &[Category] {
        &self.required
    }

    /// A successful selection starts a new booking, so it clears the
    /// confirmed mark of the previous one.
    pub fn select(&mut self, category: Category, option_id: &str) -> Result<()> {
        self.selections[category.index()].select(option_id)?;
        self.confirmed = false;
        Ok(())
    }

    pub fn current(&self, category: Category) -> Option<&str> {
        self.selections[category.index()].current()
    }

    pub fn clear(&mut self, category: Category) {
        self.selections[category.index()].clear();
    }

    pub fn is_complete(&self) -> bool {
        self.required
            .iter()
            .all(|c| self.selections[c.index()].is_selected())
    }

    /// Required categories still waiting for a selection, in category order.
    pub fn missing(&self) -> Vec<Category> {
        self.required
            .iter()
            .copied()
            .filter(|c| !self.selections[c.index()].is_selected())
            .collect()
    }

    /// True when at least one category holds something other than its
    /// resting value (none, or the persistent default).
    pub fn has_user_selection(&self) -> bool {
        Category::ALL
            .iter()
            .any(|&c| self.current(c) != self.catalog.default_for(c))
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        let owned = |c: Category| self.current(c).map(str::to_string);
        BookingSnapshot {
            pickup: owned(Category::PickupLocation),
            dropoff: owned(Category::DropoffLocation),
            vehicle: owned(Category::VehicleType),
            payment: owned(Category::PaymentMethod),
        }
    }

    /// True from an accepted booking until the next selection or reset.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn mark_confirmed(&mut self) {
        self.confirmed = true;
    }

    /// Back to the resting state: every category cleared, except those with
    /// a persistent default, which return to it.
    pub fn reset(&mut self) {
        for set in self.selections.iter_mut() {
            match self.catalog.default_for(set.category()) {
                // the catalog builder guarantees the default exists
                Some(default) => {
                    if set.select(default).is_err() {
                        set.clear();
                    }
                }
                None => set.clear(),
            }
        }
        self.confirmed = false;
    }
}
