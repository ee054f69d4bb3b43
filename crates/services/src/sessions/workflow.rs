use std::sync::Arc;

use quiz_core::model::{Catalog, QuizSettings};
use storage::repository::KeyValueStore;

use super::pacing::Pacer;
use super::params::SessionParams;
use super::progress::SessionProgress;
use super::service::{QuizSession, SessionState, SubmitOutcome};
use crate::error::SessionError;
use crate::mastery_store::MasteryStore;

/// Result of answering the current question in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswerResult {
    pub outcome: SubmitOutcome,
    pub state: SessionState,
    pub progress: SessionProgress,
}

/// Orchestrates session start and the answer/reveal/next loop.
#[derive(Clone)]
pub struct QuizLoopService {
    kv: Arc<dyn KeyValueStore>,
    settings: QuizSettings,
    pacer: Pacer,
}

impl QuizLoopService {
    /// # Errors
    ///
    /// Returns `SessionError::Settings` if `settings` fail validation.
    pub fn new(kv: Arc<dyn KeyValueStore>, settings: QuizSettings) -> Result<Self, SessionError> {
        settings.validate()?;
        Ok(Self {
            kv,
            settings,
            pacer: Pacer::default(),
        })
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a session over the first `params.item_count()` items of `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ScopeExceedsCatalog` if the params were
    /// validated against a larger catalog.
    pub async fn start_session(
        &self,
        catalog: &Catalog,
        params: &SessionParams,
    ) -> Result<QuizSession, SessionError> {
        if params.item_count() > catalog.len() {
            return Err(SessionError::ScopeExceedsCatalog {
                requested: params.item_count(),
                available: catalog.len(),
            });
        }
        let scope = catalog.scoped(params.item_count());
        let store = MasteryStore::new(Arc::clone(&self.kv), params.key().cloned());
        Ok(QuizSession::start(scope, params.total_questions(), store, &self.settings).await)
    }

    /// Answer the live question, hold the reveal for the configured delay,
    /// then move on.
    ///
    /// The answer and its persistence are complete before the delay starts.
    /// An ignored submission does not wait or advance.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        option_index: usize,
    ) -> SessionAnswerResult {
        let outcome = session.submit_answer(option_index).await;
        if matches!(outcome, SubmitOutcome::Recorded(_)) {
            self.pacer.wait(self.settings.reveal_delay()).await;
            session.advance();
        }
        SessionAnswerResult {
            outcome,
            state: session.state(),
            progress: session.progress(),
        }
    }
}
