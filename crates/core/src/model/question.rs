use serde::Serialize;

use crate::model::catalog::CatalogItem;
use crate::model::ids::ItemId;

/// Which side of the item is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show the prompt, expect the answer.
    Forward,
    /// Show the answer, expect the prompt.
    Reverse,
}

impl Direction {
    /// The side of `item` shown to the learner.
    #[must_use]
    pub fn shown<'a>(&self, item: &'a CatalogItem) -> &'a str {
        match self {
            Direction::Forward => &item.prompt,
            Direction::Reverse => &item.answer,
        }
    }

    /// The side of `item` the learner has to pick.
    #[must_use]
    pub fn expected<'a>(&self, item: &'a CatalogItem) -> &'a str {
        match self {
            Direction::Forward => &item.answer,
            Direction::Reverse => &item.prompt,
        }
    }
}

/// A multiple-choice question. Regenerated on every draw, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub item_id: ItemId,
    pub direction: Direction,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    /// The parts of the question safe to show before an answer is submitted.
    #[must_use]
    pub fn view(&self) -> QuestionView<'_> {
        QuestionView {
            item_id: self.item_id,
            prompt: &self.prompt,
            options: &self.options,
        }
    }
}

/// Prompt and options without the correct index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionView<'a> {
    pub item_id: ItemId,
    pub prompt: &'a str,
    pub options: &'a [String],
}
