//! Best-effort persistence of mastery partitions.
//!
//! Every operation returns a `Result` so callers can see what went wrong,
//! but nothing here is meant to end a session: `load` degrades to a fresh
//! partition and the session controller logs and drops `save`/`clear` errors.

use std::sync::Arc;

use quiz_core::model::{ItemId, MasteryPartition};
use storage::record::MasteryRecord;
use storage::repository::{KeyValueStore, StorageError};

use crate::sessions::SessionKey;

/// Loads and saves one session's mastery record.
///
/// Without a key the store is ephemeral: nothing is read or written.
#[derive(Clone)]
pub struct MasteryStore {
    backend: Option<(Arc<dyn KeyValueStore>, SessionKey)>,
}

impl MasteryStore {
    #[must_use]
    pub fn keyed(kv: Arc<dyn KeyValueStore>, key: SessionKey) -> Self {
        Self {
            backend: Some((kv, key)),
        }
    }

    #[must_use]
    pub fn ephemeral() -> Self {
        Self { backend: None }
    }

    /// Keyed when `key` is present, ephemeral otherwise.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, key: Option<SessionKey>) -> Self {
        match key {
            Some(key) => Self::keyed(kv, key),
            None => Self::ephemeral(),
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&SessionKey> {
        self.backend.as_ref().map(|(_, key)| key)
    }

    /// Load the partition for `scope`, falling back to all-unseen on any failure.
    pub async fn load(&self, scope: impl IntoIterator<Item = ItemId>) -> MasteryPartition {
        let scope: Vec<ItemId> = scope.into_iter().collect();
        match self.try_load(scope.iter().copied()).await {
            Ok(partition) => partition,
            Err(err) => {
                tracing::warn!(
                    key = ?self.key().map(SessionKey::as_str),
                    error = %err,
                    "discarding unreadable mastery record"
                );
                MasteryPartition::fresh(scope)
            }
        }
    }

    /// Load the partition for `scope`.
    ///
    /// A missing record or an ephemeral store yields the all-unseen partition.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the record cannot be decoded.
    pub async fn try_load(
        &self,
        scope: impl IntoIterator<Item = ItemId>,
    ) -> Result<MasteryPartition, StorageError> {
        let Some((kv, key)) = &self.backend else {
            return Ok(MasteryPartition::fresh(scope));
        };
        match kv.get(key.as_str()).await? {
            Some(raw) => Ok(MasteryRecord::from_json(&raw)?.into_partition(scope)),
            None => Ok(MasteryPartition::fresh(scope)),
        }
    }

    /// Write the `wrong`/`correct` lists of `partition`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be encoded or stored.
    pub async fn save(&self, partition: &MasteryPartition) -> Result<(), StorageError> {
        let Some((kv, key)) = &self.backend else {
            return Ok(());
        };
        let json = MasteryRecord::from_partition(partition).to_json()?;
        kv.set(key.as_str(), &json).await
    }

    /// Remove the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let Some((kv, key)) = &self.backend else {
            return Ok(());
        };
        kv.remove(key.as_str()).await
    }
}
