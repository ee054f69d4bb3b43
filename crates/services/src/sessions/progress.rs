use quiz_core::model::PoolSizes;
use serde::Serialize;

use super::service::SessionState;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub state: SessionState,
    pub total_asked: u32,
    pub total_correct: u32,
    pub total_questions: u32,
    pub pools: PoolSizes,
}

/// Final score handed back when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub total_correct: u32,
    pub total_asked: u32,
}
