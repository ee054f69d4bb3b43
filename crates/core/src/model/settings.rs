use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::DEFAULT_OPTION_COUNT;
use crate::model::history::DEFAULT_HISTORY_SIZE;
use crate::model::partition::Pool;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("{pool} pool weight must be finite and > 0, got {provided}")]
    InvalidWeight { pool: Pool, provided: f64 },

    #[error("history size must be > 0")]
    InvalidHistorySize,

    #[error("option count must be at least 2, got {provided}")]
    InvalidOptionCount { provided: usize },

    #[error("reveal delay must be at most {max} ms, got {provided}")]
    InvalidRevealDelay { provided: u64, max: u64 },
}

//
// ─── POOL WEIGHTS ──────────────────────────────────────────────────────────────
//

/// Relative likelihood of drawing from each pool.
///
/// Weights of empty pools are dropped, not redistributed; the draw is taken
/// over the sum of the weights that remain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolWeights {
    pub unseen: f64,
    pub wrong: f64,
    pub correct: f64,
}

impl PoolWeights {
    #[must_use]
    pub fn weight(&self, pool: Pool) -> f64 {
        match pool {
            Pool::Unseen => self.unseen,
            Pool::Wrong => self.wrong,
            Pool::Correct => self.correct,
        }
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidWeight` for the first non-positive or
    /// non-finite weight.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for pool in Pool::ALL {
            let provided = self.weight(pool);
            if !provided.is_finite() || provided <= 0.0 {
                return Err(SettingsError::InvalidWeight { pool, provided });
            }
        }
        Ok(())
    }
}

impl Default for PoolWeights {
    fn default() -> Self {
        Self {
            unseen: 0.60,
            wrong: 0.30,
            correct: 0.10,
        }
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for selection, question shape and pacing.
///
/// Deserializes with defaults for missing fields and is validated on the way
/// in, so an out-of-range config fails to load instead of reaching a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuizSettings")]
pub struct QuizSettings {
    weights: PoolWeights,
    history_size: usize,
    option_count: usize,
    reveal_delay_ms: u64,
}

impl QuizSettings {
    pub const MAX_REVEAL_DELAY_MS: u64 = 10_000;

    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any parameter is out of range.
    pub fn new(
        weights: PoolWeights,
        history_size: usize,
        option_count: usize,
        reveal_delay_ms: u64,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            weights,
            history_size,
            option_count,
            reveal_delay_ms,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `SettingsError` describing the first invalid field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.weights.validate()?;
        if self.history_size == 0 {
            return Err(SettingsError::InvalidHistorySize);
        }
        if self.option_count < 2 {
            return Err(SettingsError::InvalidOptionCount {
                provided: self.option_count,
            });
        }
        if self.reveal_delay_ms > Self::MAX_REVEAL_DELAY_MS {
            return Err(SettingsError::InvalidRevealDelay {
                provided: self.reveal_delay_ms,
                max: Self::MAX_REVEAL_DELAY_MS,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn weights(&self) -> PoolWeights {
        self.weights
    }

    #[must_use]
    pub fn history_size(&self) -> usize {
        self.history_size
    }

    /// Options per question including the correct one.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.option_count
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            weights: PoolWeights::default(),
            history_size: DEFAULT_HISTORY_SIZE,
            option_count: DEFAULT_OPTION_COUNT,
            reveal_delay_ms: 1_200,
        }
    }
}

/// Wire shape of [`QuizSettings`] before validation.
#[derive(Deserialize)]
#[serde(default)]
struct RawQuizSettings {
    weights: PoolWeights,
    history_size: usize,
    option_count: usize,
    reveal_delay_ms: u64,
}

impl Default for RawQuizSettings {
    fn default() -> Self {
        let defaults = QuizSettings::default();
        Self {
            weights: defaults.weights,
            history_size: defaults.history_size,
            option_count: defaults.option_count,
            reveal_delay_ms: defaults.reveal_delay_ms,
        }
    }
}

impl TryFrom<RawQuizSettings> for QuizSettings {
    type Error = SettingsError;

    fn try_from(raw: RawQuizSettings) -> Result<Self, Self::Error> {
        Self::new(
            raw.weights,
            raw.history_size,
            raw.option_count,
            raw.reveal_delay_ms,
        )
    }
}
