use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate item id in catalog: {0}")]
    DuplicateId(ItemId),
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// A single prompt/answer pair the learner is drilled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub prompt: String,
    pub answer: String,
}

impl CatalogItem {
    #[must_use]
    pub fn new(id: ItemId, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, read-only list of items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, keeping caller order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two items share an id.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// The first `count` items, which is the scope a session drills.
    ///
    /// A `count` larger than the catalog yields the whole catalog.
    #[must_use]
    pub fn scoped(&self, count: usize) -> Self {
        Self {
            items: self.items.iter().take(count).cloned().collect(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> CatalogItem {
        CatalogItem::new(ItemId::new(id), format!("Q{id}"), format!("A{id}"))
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![item(1), item(2), item(1)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(ItemId::new(1)));
    }

    #[test]
    fn scoped_takes_leading_items() {
        let catalog = Catalog::new((1..=6).map(item).collect()).unwrap();
        let scoped = catalog.scoped(4);
        let ids: Vec<u64> = scoped.ids().map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(catalog.scoped(100).len(), 6);
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = Catalog::new(vec![item(3), item(9)]).unwrap();
        assert_eq!(catalog.get(ItemId::new(9)).unwrap().prompt, "Q9");
        assert!(catalog.get(ItemId::new(4)).is_none());
    }
}
