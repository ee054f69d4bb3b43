use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use quiz_core::model::{
    Catalog, ItemId, MasteryPartition, PickHistory, Pool, Question, QuestionView, QuizSettings,
};
use quiz_core::{QuestionGenerator, Selector};

use super::params::SessionKey;
use super::progress::{SessionProgress, SessionSummary};
use crate::mastery_store::MasteryStore;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session is in its question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// A question is live and waiting for an answer.
    Asking,
    /// The answer is recorded and shown; the next pick is pending.
    Revealed,
    /// Terminal.
    Finished,
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded(AnswerFeedback),
    /// No live question; the first answer to a question is authoritative.
    Ignored,
}

/// Feedback for one recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub item_id: ItemId,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    /// Pool the item moved into.
    pub pool: Pool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One bounded run of questions over a catalog scope.
///
/// The session trusts its inputs: `scope` is already the sliced catalog and
/// `total_questions` already validated (see `SessionParams`). Persistence is
/// best-effort; a failing store never changes the outcome of a transition.
pub struct QuizSession {
    scope: Catalog,
    total_questions: u32,
    store: MasteryStore,
    selector: Selector,
    generator: QuestionGenerator,
    partition: MasteryPartition,
    history: PickHistory,
    state: SessionState,
    question: Option<Question>,
    last_answer: Option<AnswerFeedback>,
    total_asked: u32,
    total_correct: u32,
    rng: StdRng,
}

impl QuizSession {
    /// Load persisted mastery for `scope` and pose the first question.
    pub async fn start(
        scope: Catalog,
        total_questions: u32,
        store: MasteryStore,
        settings: &QuizSettings,
    ) -> Self {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::start_with_rng(scope, total_questions, store, settings, rng).await
    }

    /// Same as [`QuizSession::start`] with a caller-provided random source.
    pub async fn start_with_rng(
        scope: Catalog,
        total_questions: u32,
        store: MasteryStore,
        settings: &QuizSettings,
        rng: StdRng,
    ) -> Self {
        let partition = store.load(scope.ids()).await;
        let mut session = Self {
            scope,
            total_questions,
            store,
            selector: Selector::new(settings.weights()),
            generator: QuestionGenerator::new(settings.option_count()),
            partition,
            history: PickHistory::with_capacity(settings.history_size()),
            state: SessionState::Asking,
            question: None,
            last_answer: None,
            total_asked: 0,
            total_correct: 0,
            rng,
        };

        let pools = session.partition.sizes();
        tracing::info!(
            key = ?session.key().map(SessionKey::as_str),
            items = session.scope.len(),
            total_questions,
            unseen = pools.unseen,
            wrong = pools.wrong,
            correct = pools.correct,
            "quiz session started"
        );

        session.pick_next();
        session
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// The live or just-answered question. `None` once finished.
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Prompt and options only, for display before an answer.
    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView<'_>> {
        self.question.as_ref().map(Question::view)
    }

    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerFeedback> {
        self.last_answer.as_ref()
    }

    #[must_use]
    pub fn partition(&self) -> &MasteryPartition {
        &self.partition
    }

    #[must_use]
    pub fn history(&self) -> &PickHistory {
        &self.history
    }

    #[must_use]
    pub fn scope(&self) -> &Catalog {
        &self.scope
    }

    #[must_use]
    pub fn key(&self) -> Option<&SessionKey> {
        self.store.key()
    }

    #[must_use]
    pub fn total_asked(&self) -> u32 {
        self.total_asked
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            state: self.state,
            total_asked: self.total_asked,
            total_correct: self.total_correct,
            total_questions: self.total_questions,
            pools: self.partition.sizes(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_correct: self.total_correct,
            total_asked: self.total_asked,
        }
    }

    /// Record an answer to the live question and reveal it.
    ///
    /// Any index other than the correct one, out-of-range included, counts as
    /// wrong. Outside `Asking` the call is ignored.
    pub async fn submit_answer(&mut self, option_index: usize) -> SubmitOutcome {
        if self.state != SessionState::Asking {
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.question.as_ref() else {
            return SubmitOutcome::Ignored;
        };

        let item_id = question.item_id;
        let correct_index = question.correct_index;
        let is_correct = question.is_correct(option_index);

        self.total_asked = self.total_asked.saturating_add(1);
        if is_correct {
            self.total_correct = self.total_correct.saturating_add(1);
        }
        let transition = self.partition.record_answer(item_id, is_correct);
        let pool = transition.map_or(
            if is_correct { Pool::Correct } else { Pool::Wrong },
            |t| t.to,
        );
        tracing::debug!(
            item = %item_id,
            is_correct,
            from = ?transition.map(|t| t.from),
            to = %pool,
            asked = self.total_asked,
            "answer recorded"
        );

        self.persist().await;

        let feedback = AnswerFeedback {
            item_id,
            selected: option_index,
            correct_index,
            is_correct,
            pool,
        };
        self.last_answer = Some(feedback.clone());
        self.state = SessionState::Revealed;
        SubmitOutcome::Recorded(feedback)
    }

    /// Move past a revealed answer: finish, or pose the next question.
    ///
    /// Call after the reveal delay. No-op in any other state.
    pub fn advance(&mut self) -> SessionState {
        if self.state == SessionState::Revealed {
            self.pick_next();
        }
        self.state
    }

    /// Reset every item to unseen, zero the score and start over.
    ///
    /// Allowed from any state. The reset partition is persisted.
    pub async fn restart(&mut self) {
        self.partition = MasteryPartition::fresh(self.scope.ids());
        self.history.clear();
        self.total_asked = 0;
        self.total_correct = 0;
        self.question = None;
        self.last_answer = None;
        self.state = SessionState::Asking;

        self.persist().await;
        tracing::info!(key = ?self.key().map(SessionKey::as_str), "quiz session restarted");
        self.pick_next();
    }

    /// End the session and hand back the score.
    ///
    /// A finished session clears its persisted record. An unfinished one is
    /// abandoned: its record stays so a later session can resume from it.
    pub async fn exit(self) -> SessionSummary {
        let summary = self.summary();
        if self.is_finished() {
            if let Err(err) = self.store.clear().await {
                tracing::warn!(
                    key = ?self.key().map(SessionKey::as_str),
                    error = %err,
                    "failed to clear mastery record"
                );
            }
        } else {
            tracing::debug!(
                key = ?self.key().map(SessionKey::as_str),
                "session abandoned; mastery record kept"
            );
        }
        summary
    }

    async fn persist(&self) {
        // Persistence errors never end a session.
        if let Err(err) = self.store.save(&self.partition).await {
            tracing::warn!(
                key = ?self.key().map(SessionKey::as_str),
                error = %err,
                "failed to save mastery record"
            );
        }
    }

    fn pick_next(&mut self) {
        if self.total_asked >= self.total_questions {
            self.finish();
            return;
        }
        let Some(id) = self
            .selector
            .pick(&self.partition, &self.history, &mut self.rng)
        else {
            self.finish();
            return;
        };
        let Some(item) = self.scope.get(id) else {
            tracing::warn!(item = %id, "picked id missing from scope");
            self.finish();
            return;
        };

        let question = self.generator.generate(&self.scope, item, &mut self.rng);
        tracing::debug!(item = %id, pool = ?self.partition.pool_of(id), "next question");
        self.history.push(id);
        self.question = Some(question);
        self.last_answer = None;
        self.state = SessionState::Asking;
    }

    fn finish(&mut self) {
        self.question = None;
        self.state = SessionState::Finished;
        tracing::info!(
            key = ?self.key().map(SessionKey::as_str),
            total_correct = self.total_correct,
            total_asked = self.total_asked,
            "quiz session finished"
        );
    }
}
