use crate::core::booking_state::BookingState;
use crate::domain::model::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightEntry {
    pub category: Category,
    pub option_id: String,
    pub highlighted: bool,
}

/// Desired emphasis for every option in the catalog, derived from a
/// booking state. At most one entry per category is highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HighlightPlan {
    entries: Vec<HighlightEntry>,
}

impl HighlightPlan {
    pub fn from_state(state: &BookingState) -> Self {
        let catalog = state.catalog();
        let entries = Category::ALL
            .iter()
            .flat_map(|&category| {
                let current = state.current(category);
                catalog.options(category).map(move |option| HighlightEntry {
                    category,
                    option_id: option.id.clone(),
                    highlighted: current == Some(option.id.as_str()),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[HighlightEntry] {
        &self.entries
    }

    pub fn highlighted(&self, category: Category) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.category == category && e.highlighted)
            .map(|e| e.option_id.as_str())
    }

    pub fn highlighted_count(&self, category: Category) -> usize {
        self.entries
            .iter()
            .filter(|e| e.category == category && e.highlighted)
            .count()
    }

    pub fn is_highlighted(&self, category: Category, option_id: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.category == category && e.option_id == option_id && e.highlighted)
    }

    /// Entries whose emphasis differs from `previous`, in catalog order.
    /// Options absent from `previous` count as not highlighted there.
    pub fn diff(&self, previous: &HighlightPlan) -> Vec<HighlightEntry> {
        self.entries
            .iter()
            .filter(|e| previous.is_highlighted(e.category, &e.option_id) != e.highlighted)
            .cloned()
            .collect()
    }

    /// Categories touched by `diff(previous)`, each listed once.
    pub fn changed_categories(&self, previous: &HighlightPlan) -> Vec<Category> {
        let mut categories: Vec<Category> =
            self.diff(previous).into_iter().map(|e| e.category).collect();
        categories.dedup();
        categories
    }
}
