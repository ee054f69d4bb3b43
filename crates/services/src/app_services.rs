use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::sessions::{Pacer, QuizLoopService};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct QuizServices {
    storage: Storage,
    quiz_loop: Arc<QuizLoopService>,
}

impl QuizServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// settings are invalid.
    pub async fn new_sqlite(db_url: &str, settings: QuizSettings) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, settings, Pacer::default())
    }

    /// Build services over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the settings are invalid.
    pub fn in_memory(settings: QuizSettings, pacer: Pacer) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), settings, pacer)
    }

    fn from_storage(
        storage: Storage,
        settings: QuizSettings,
        pacer: Pacer,
    ) -> Result<Self, AppServicesError> {
        let quiz_loop =
            QuizLoopService::new(Arc::clone(&storage.kv), settings)?.with_pacer(pacer);
        Ok(Self {
            storage,
            quiz_loop: Arc::new(quiz_loop),
        })
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
