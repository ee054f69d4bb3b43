mod pacing;
mod params;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{SessionError, SessionParamsError};
pub use pacing::Pacer;
pub use params::{SessionKey, SessionParams};
pub use progress::{SessionProgress, SessionSummary};
pub use service::{AnswerFeedback, QuizSession, SessionState, SubmitOutcome};
pub use workflow::{QuizLoopService, SessionAnswerResult};
