#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod mastery_store;
pub mod sessions;

pub use sessions as session;

pub use app_services::QuizServices;
pub use error::{AppServicesError, SessionError, SessionParamsError};
pub use mastery_store::MasteryStore;

pub use sessions::{
    AnswerFeedback, Pacer, QuizLoopService, QuizSession, SessionAnswerResult, SessionKey,
    SessionParams, SessionProgress, SessionState, SessionSummary, SubmitOutcome,
};
