use crate::domain::model::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDefault {
    pub category: Category,
    pub option_id: String,
    revision: u64,
}

/// One-shot default selections that are scheduled up front and applied
/// later. A pending default is dropped instead of applied when its category
/// changed after scheduling.
#[derive(Debug, Clone, Default)]
pub struct DeferredDefaults {
    pending: Vec<PendingDefault>,
    revisions: [u64; 4],
}

impl DeferredDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier pending default for the same category.
    pub fn schedule(&mut self, category: Category, option_id: impl Into<String>) {
        self.pending.retain(|p| p.category != category);
        self.pending.push(PendingDefault {
            category,
            option_id: option_id.into(),
            revision: self.revisions[category.index()],
        });
    }

    /// Record a change to `category` that supersedes its pending default.
    pub fn touch(&mut self, category: Category) {
        self.revisions[category.index()] += 1;
    }

    pub fn touch_all(&mut self) {
        for category in Category::ALL {
            self.touch(category);
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> &[PendingDefault] {
        &self.pending
    }

    /// Drain the queue in scheduling order, split into defaults still
    /// applicable and those superseded since they were scheduled.
    pub fn take(&mut self) -> (Vec<PendingDefault>, Vec<PendingDefault>) {
        let revisions = self.revisions;
        self.pending
            .drain(..)
            .partition(|p| p.revision == revisions[p.category.index()])
    }
}
