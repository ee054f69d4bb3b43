use std::collections::VecDeque;

use crate::model::ids::ItemId;

/// Default number of recent picks remembered for anti-repeat.
pub const DEFAULT_HISTORY_SIZE: usize = 3;

/// Bounded list of recently picked ids, most recent last.
///
/// Only used to avoid asking the same item in tight succession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickHistory {
    recent: VecDeque<ItemId>,
    capacity: usize,
}

impl PickHistory {
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, id: ItemId) {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(id);
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.recent.contains(&id)
    }

    #[must_use]
    pub fn last(&self) -> Option<ItemId> {
        self.recent.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.recent.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

impl Default for PickHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }
}
