use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ids::ItemId;

/// Mastery category an item currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Unseen,
    Wrong,
    Correct,
}

impl Pool {
    pub const ALL: [Pool; 3] = [Pool::Unseen, Pool::Wrong, Pool::Correct];
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pool::Unseen => "unseen",
            Pool::Wrong => "wrong",
            Pool::Correct => "correct",
        };
        f.write_str(name)
    }
}

/// Member counts per pool, for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PoolSizes {
    pub unseen: usize,
    pub wrong: usize,
    pub correct: usize,
}

/// How an answer moved an item between pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolTransition {
    pub id: ItemId,
    pub from: Pool,
    pub to: Pool,
}

/// Three disjoint sets of item ids covering the session scope.
///
/// Every scoped id lives in exactly one pool. The sets are private so the
/// only way to move an id is [`MasteryPartition::record_answer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MasteryPartition {
    unseen: BTreeSet<ItemId>,
    wrong: BTreeSet<ItemId>,
    correct: BTreeSet<ItemId>,
}

impl MasteryPartition {
    /// Every id starts unseen.
    #[must_use]
    pub fn fresh(ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            unseen: ids.into_iter().collect(),
            wrong: BTreeSet::new(),
            correct: BTreeSet::new(),
        }
    }

    /// Rebuild a partition from persisted `wrong`/`correct` lists.
    ///
    /// Ids outside `scope` are dropped. An id listed in both lists is kept in
    /// `correct`. Everything else in `scope` is unseen.
    #[must_use]
    pub fn from_persisted(
        scope: impl IntoIterator<Item = ItemId>,
        wrong: impl IntoIterator<Item = ItemId>,
        correct: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        let scope: BTreeSet<ItemId> = scope.into_iter().collect();
        let correct: BTreeSet<ItemId> = correct
            .into_iter()
            .filter(|id| scope.contains(id))
            .collect();
        let wrong: BTreeSet<ItemId> = wrong
            .into_iter()
            .filter(|id| scope.contains(id) && !correct.contains(id))
            .collect();
        let unseen = scope
            .into_iter()
            .filter(|id| !wrong.contains(id) && !correct.contains(id))
            .collect();

        Self {
            unseen,
            wrong,
            correct,
        }
    }

    /// Move `id` according to the answer.
    ///
    /// The id leaves `unseen` unconditionally. A correct answer moves it to
    /// `correct`, an incorrect one to `wrong`. Returns `None` when the id is
    /// not part of this partition, leaving the sets untouched.
    pub fn record_answer(&mut self, id: ItemId, is_correct: bool) -> Option<PoolTransition> {
        let from = self.pool_of(id)?;
        self.unseen.remove(&id);
        let to = if is_correct {
            self.wrong.remove(&id);
            self.correct.insert(id);
            Pool::Correct
        } else {
            self.correct.remove(&id);
            self.wrong.insert(id);
            Pool::Wrong
        };
        Some(PoolTransition { id, from, to })
    }

    #[must_use]
    pub fn pool_of(&self, id: ItemId) -> Option<Pool> {
        if self.unseen.contains(&id) {
            Some(Pool::Unseen)
        } else if self.wrong.contains(&id) {
            Some(Pool::Wrong)
        } else if self.correct.contains(&id) {
            Some(Pool::Correct)
        } else {
            None
        }
    }

    #[must_use]
    pub fn members(&self, pool: Pool) -> &BTreeSet<ItemId> {
        match pool {
            Pool::Unseen => &self.unseen,
            Pool::Wrong => &self.wrong,
            Pool::Correct => &self.correct,
        }
    }

    #[must_use]
    pub fn unseen(&self) -> &BTreeSet<ItemId> {
        &self.unseen
    }

    #[must_use]
    pub fn wrong(&self) -> &BTreeSet<ItemId> {
        &self.wrong
    }

    #[must_use]
    pub fn correct(&self) -> &BTreeSet<ItemId> {
        &self.correct
    }

    #[must_use]
    pub fn sizes(&self) -> PoolSizes {
        PoolSizes {
            unseen: self.unseen.len(),
            wrong: self.wrong.len(),
            correct: self.correct.len(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.unseen.len() + self.wrong.len() + self.correct.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the pools are pairwise disjoint and their union is `scope`.
    #[must_use]
    pub fn covers_exactly(&self, scope: impl IntoIterator<Item = ItemId>) -> bool {
        let scope: BTreeSet<ItemId> = scope.into_iter().collect();
        let disjoint = self.unseen.is_disjoint(&self.wrong)
            && self.unseen.is_disjoint(&self.correct)
            && self.wrong.is_disjoint(&self.correct);
        let union: BTreeSet<ItemId> = self
            .unseen
            .iter()
            .chain(&self.wrong)
            .chain(&self.correct)
            .copied()
            .collect();
        disjoint && union == scope
    }
}
