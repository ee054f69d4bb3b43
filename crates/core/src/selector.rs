use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::{ItemId, MasteryPartition, PickHistory, Pool, PoolWeights};

/// Chooses the next item to ask.
///
/// Selection is two independent steps: a weighted draw over the non-empty
/// pools, then a uniform draw inside the chosen pool that avoids recent picks
/// whenever the pool has anything else to offer.
///
/// # Examples
///
/// ```
/// # use quiz_core::Selector;
/// # use quiz_core::model::{ItemId, MasteryPartition, PickHistory, PoolWeights};
/// let selector = Selector::new(PoolWeights::default());
/// let partition = MasteryPartition::fresh((1..=5).map(ItemId::new));
/// let picked = selector.pick(&partition, &PickHistory::default(), &mut rand::rng());
/// assert!(picked.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Selector {
    weights: PoolWeights,
}

impl Selector {
    #[must_use]
    pub fn new(weights: PoolWeights) -> Self {
        Self { weights }
    }

    /// Pick the next item id, or `None` when every pool is empty.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        partition: &MasteryPartition,
        history: &PickHistory,
        rng: &mut R,
    ) -> Option<ItemId> {
        let pool = self.choose_pool(partition, rng)?;
        pick_from_pool(partition.members(pool), history, rng)
    }

    /// Weighted draw over the pools that currently have members.
    ///
    /// Weights that do not sum to a positive finite total cannot be sampled;
    /// the last non-empty pool is returned instead.
    pub fn choose_pool<R: Rng + ?Sized>(
        &self,
        partition: &MasteryPartition,
        rng: &mut R,
    ) -> Option<Pool> {
        let candidates = self.candidates(partition);
        if candidates.is_empty() {
            return None;
        }
        let total: f64 = candidates.iter().map(|(_, weight)| weight).sum();
        if !total.is_finite() || total <= 0.0 {
            return candidates.last().map(|(pool, _)| *pool);
        }
        let draw = rng.random_range(0.0..total);
        walk(&candidates, draw)
    }

    fn candidates(&self, partition: &MasteryPartition) -> Vec<(Pool, f64)> {
        Pool::ALL
            .into_iter()
            .filter(|pool| !partition.members(*pool).is_empty())
            .map(|pool| (pool, self.weights.weight(pool)))
            .collect()
    }
}

/// Subtract weights from `draw` in order; the first pool that brings it to
/// zero or below wins. Rounding can leave a sliver above zero after the last
/// candidate, which then belongs to the last candidate.
fn walk(candidates: &[(Pool, f64)], draw: f64) -> Option<Pool> {
    let mut remaining = draw;
    for (pool, weight) in candidates {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(*pool);
        }
    }
    candidates.last().map(|(pool, _)| *pool)
}

/// Uniform draw from `members`, skipping ids in `history` unless that would
/// leave nothing.
pub fn pick_from_pool<R: Rng + ?Sized>(
    members: &BTreeSet<ItemId>,
    history: &PickHistory,
    rng: &mut R,
) -> Option<ItemId> {
    let not_recent: Vec<ItemId> = members
        .iter()
        .copied()
        .filter(|id| !history.contains(*id))
        .collect();
    let pick_from: Vec<ItemId> = if not_recent.is_empty() {
        members.iter().copied().collect()
    } else {
        not_recent
    };
    pick_from.choose(rng).copied()
}
