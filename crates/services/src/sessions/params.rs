use std::fmt;

use crate::error::SessionParamsError;

/// Persistence key for one session's mastery record.
///
/// Keys are namespaced by catalog kind and scope size (`kanji-5`,
/// `vocab-12`) so sessions over different scopes never share a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// Build `"{kind}-{item_count}"`.
    ///
    /// # Errors
    ///
    /// Returns `SessionParamsError::EmptyKeyKind` if `kind` is blank.
    pub fn namespaced(kind: &str, item_count: usize) -> Result<Self, SessionParamsError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(SessionParamsError::EmptyKeyKind);
        }
        Ok(Self(format!("{kind}-{item_count}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated parameters for starting a session.
///
/// This is the input boundary: the session controller itself trusts what it
/// is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    item_count: usize,
    total_questions: u32,
    key: Option<SessionKey>,
}

impl SessionParams {
    pub const MIN_ITEM_COUNT: usize = 4;
    pub const DEFAULT_TOTAL_QUESTIONS: u32 = 20;

    /// Validate the scope size against the catalog and settle the question count.
    ///
    /// `total_questions` defaults to `max(20, item_count)` and is never lower
    /// than `item_count`.
    ///
    /// # Errors
    ///
    /// Returns `SessionParamsError` if `item_count` is below the minimum or
    /// larger than `available`.
    pub fn new(
        available: usize,
        item_count: usize,
        total_questions: Option<u32>,
    ) -> Result<Self, SessionParamsError> {
        if item_count < Self::MIN_ITEM_COUNT {
            return Err(SessionParamsError::TooFewItems {
                provided: item_count,
                min: Self::MIN_ITEM_COUNT,
            });
        }
        if item_count > available {
            return Err(SessionParamsError::ExceedsCatalog {
                provided: item_count,
                available,
            });
        }

        let floor = u32::try_from(item_count).unwrap_or(u32::MAX);
        let total_questions = total_questions
            .unwrap_or(Self::DEFAULT_TOTAL_QUESTIONS.max(floor))
            .max(floor);

        Ok(Self {
            item_count,
            total_questions,
            key: None,
        })
    }

    /// Parse raw form input.
    ///
    /// Each field is read up to its first non-digit, so `"12abc"` is 12. A
    /// question count with no leading digits, or zero, falls back to the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `SessionParamsError::NotANumber` if `item_count` has no
    /// leading digits, plus everything [`SessionParams::new`] rejects.
    pub fn from_input(
        available: usize,
        item_count: &str,
        total_questions: &str,
    ) -> Result<Self, SessionParamsError> {
        let count = leading_digits(item_count)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .ok_or_else(|| SessionParamsError::NotANumber {
                raw: item_count.to_owned(),
            })?;
        let total = leading_digits(total_questions)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .filter(|total| *total > 0);
        Self::new(available, count, total)
    }

    /// Persist mastery under `key`. Without a key the session is in-memory only.
    #[must_use]
    pub fn with_key(mut self, key: SessionKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Shorthand for [`SessionKey::namespaced`] with this scope size.
    ///
    /// # Errors
    ///
    /// Returns `SessionParamsError::EmptyKeyKind` if `kind` is blank.
    pub fn with_kind(self, kind: &str) -> Result<Self, SessionParamsError> {
        let key = SessionKey::namespaced(kind, self.item_count)?;
        Ok(self.with_key(key))
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn key(&self) -> Option<&SessionKey> {
        self.key.as_ref()
    }
}

/// Digits at the start of `raw` (after whitespace), saturating on overflow.
fn leading_digits(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
