use serde::{Deserialize, Serialize};
use serde_json::Value;

use quiz_core::model::{ItemId, MasteryPartition};

use crate::repository::StorageError;

/// Persisted shape of a mastery partition: `{"wrong": [..], "correct": [..]}`.
///
/// `unseen` is never stored; it is derived from the catalog on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MasteryRecord {
    pub wrong: Vec<ItemId>,
    pub correct: Vec<ItemId>,
}

/// Lenient wire form: entries that are not unsigned integers are skipped.
#[derive(Deserialize)]
struct RawMasteryRecord {
    #[serde(default)]
    wrong: Vec<Value>,
    #[serde(default)]
    correct: Vec<Value>,
}

fn ids_from_values(values: Vec<Value>) -> Vec<ItemId> {
    values
        .into_iter()
        .filter_map(|value| value.as_u64())
        .map(ItemId::new)
        .collect()
}

impl MasteryRecord {
    #[must_use]
    pub fn from_partition(partition: &MasteryPartition) -> Self {
        Self {
            wrong: partition.wrong().iter().copied().collect(),
            correct: partition.correct().iter().copied().collect(),
        }
    }

    /// Rebuild a partition over `scope`, dropping ids no longer in it.
    #[must_use]
    pub fn into_partition(self, scope: impl IntoIterator<Item = ItemId>) -> MasteryPartition {
        MasteryPartition::from_persisted(scope, self.wrong, self.correct)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record cannot be encoded.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Decode a stored record.
    ///
    /// Missing lists default to empty and non-numeric ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `raw` is not a JSON object
    /// whose lists are arrays.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        let raw: RawMasteryRecord =
            serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Self {
            wrong: ids_from_values(raw.wrong),
            correct: ids_from_values(raw.correct),
        })
    }
}
