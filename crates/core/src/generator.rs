use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{Catalog, CatalogItem, Direction, Question};

/// Default number of options per question, correct one included.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Builds multiple-choice questions from catalog items.
///
/// The direction is a fair coin so recall is tested both ways. Distractors are
/// other catalog items projected onto the same side as the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionGenerator {
    option_count: usize,
}

impl QuestionGenerator {
    /// `option_count` below 1 is raised to 1 (the correct answer alone).
    #[must_use]
    pub fn new(option_count: usize) -> Self {
        Self {
            option_count: option_count.max(1),
        }
    }

    /// Build a question for `item`.
    ///
    /// When the catalog has fewer than `option_count - 1` other items, the
    /// question simply has fewer options.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        item: &CatalogItem,
        rng: &mut R,
    ) -> Question {
        let direction = if rng.random_bool(0.5) {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        self.generate_with_direction(catalog, item, direction, rng)
    }

    /// Same as [`QuestionGenerator::generate`] with a fixed direction.
    pub fn generate_with_direction<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        item: &CatalogItem,
        direction: Direction,
        rng: &mut R,
    ) -> Question {
        let mut others: Vec<&CatalogItem> = catalog
            .items()
            .iter()
            .filter(|other| other.id != item.id)
            .collect();
        others.shuffle(rng);

        // (is_correct, text); the flag survives the shuffle so duplicate texts
        // cannot confuse the index.
        let mut options: Vec<(bool, String)> = Vec::with_capacity(self.option_count);
        options.push((true, direction.expected(item).to_owned()));
        options.extend(
            others
                .into_iter()
                .take(self.option_count - 1)
                .map(|other| (false, direction.expected(other).to_owned())),
        );
        options.shuffle(rng);

        let correct_index = options
            .iter()
            .position(|(is_correct, _)| *is_correct)
            .unwrap_or_default();

        Question {
            item_id: item.id,
            direction,
            prompt: direction.shown(item).to_owned(),
            options: options.into_iter().map(|(_, text)| text).collect(),
            correct_index,
        }
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_OPTION_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogItem, ItemId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(n: u64) -> Catalog {
        Catalog::new(
            (1..=n)
                .map(|id| CatalogItem::new(ItemId::new(id), format!("Q{id}"), format!("A{id}")))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn forward_question_asks_for_answers() {
        let catalog = catalog(6);
        let item = catalog.get(ItemId::new(2)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let q = QuestionGenerator::default().generate_with_direction(
            &catalog,
            item,
            Direction::Forward,
            &mut rng,
        );

        assert_eq!(q.item_id, ItemId::new(2));
        assert_eq!(q.prompt, "Q2");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_option(), Some("A2"));
        assert!(q.options.iter().all(|opt| opt.starts_with('A')));
    }

    #[test]
    fn reverse_question_asks_for_prompts() {
        let catalog = catalog(6);
        let item = catalog.get(ItemId::new(5)).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let q = QuestionGenerator::default().generate_with_direction(
            &catalog,
            item,
            Direction::Reverse,
            &mut rng,
        );

        assert_eq!(q.prompt, "A5");
        assert_eq!(q.correct_option(), Some("Q5"));
        assert!(q.options.iter().all(|opt| opt.starts_with('Q')));
    }

    #[test]
    fn distractors_are_distinct_other_items() {
        let catalog = catalog(10);
        let item = catalog.get(ItemId::new(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let q = QuestionGenerator::default().generate(&catalog, item, &mut rng);
            let mut seen = q.options.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 4);
            let correct = q.correct_option().unwrap();
            assert_eq!(q.options.iter().filter(|opt| *opt == correct).count(), 1);
        }
    }

    #[test]
    fn small_catalog_yields_fewer_options() {
        let catalog = catalog(3);
        let item = catalog.get(ItemId::new(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let q = QuestionGenerator::default().generate(&catalog, item, &mut rng);
        assert_eq!(q.options.len(), 3);
        assert!(q.correct_index < 3);

        let lonely = Catalog::new(vec![item.clone()]).unwrap();
        let q = QuestionGenerator::default().generate(&lonely, item, &mut rng);
        assert_eq!(q.options.len(), 1);
        assert_eq!(q.correct_index, 0);
    }

    #[test]
    fn duplicate_texts_keep_the_right_index() {
        let catalog = Catalog::new(vec![
            CatalogItem::new(ItemId::new(1), "same", "same"),
            CatalogItem::new(ItemId::new(2), "same", "same"),
            CatalogItem::new(ItemId::new(3), "x", "y"),
        ])
        .unwrap();
        let item = catalog.get(ItemId::new(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let q = QuestionGenerator::default().generate(&catalog, item, &mut rng);
            assert_eq!(q.correct_option(), Some("same"));
        }
    }

    #[test]
    fn correct_index_is_spread_over_positions() {
        let catalog = catalog(8);
        let item = catalog.get(ItemId::new(4)).unwrap();
        let generator = QuestionGenerator::default();
        let mut rng = StdRng::seed_from_u64(99);

        let mut counts = [0_u32; 4];
        for _ in 0..4_000 {
            let q = generator.generate(&catalog, item, &mut rng);
            counts[q.correct_index] += 1;
        }
        for count in counts {
            assert!((850..=1_150).contains(&count), "skewed positions: {counts:?}");
        }
    }

    #[test]
    fn both_directions_occur() {
        let catalog = catalog(5);
        let item = catalog.get(ItemId::new(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let reversed = (0..1_000)
            .filter(|_| {
                QuestionGenerator::default()
                    .generate(&catalog, item, &mut rng)
                    .direction
                    == Direction::Reverse
            })
            .count();
        assert!((400..=600).contains(&reversed), "reversed {reversed}");
    }
}
