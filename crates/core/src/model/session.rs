use crate::model::{OptionKey, ProgressSnapshot, QuestionPayload, SessionId};

/// Score every session starts from.
pub const INITIAL_SCORE: i64 = 100;

/// Client-side record of the live quiz session.
///
/// Holds identifiers, the last question, server-driven counters and the
/// transient flags guarding in-flight requests. `selected_answer` is only
/// `Some` between a question being shown and its answer being submitted, and
/// `session_id` is only `Some` between start and restart. While
/// `awaiting_continue` is set the learner is looking at the results for an
/// answered question and `current_question` already holds one they have not
/// seen yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session_id: Option<SessionId>,
    pub current_question: Option<QuestionPayload>,
    pub selected_answer: Option<OptionKey>,
    pub score: i64,
    pub progress: ProgressSnapshot,
    pub concepts_learned: u32,
    pub session_complete: bool,
    pub awaiting_continue: bool,
    pub is_loading: bool,
    pub is_submitting: bool,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: None,
            current_question: None,
            selected_answer: None,
            score: INITIAL_SCORE,
            progress: ProgressSnapshot::default(),
            concepts_learned: 0,
            session_complete: false,
            awaiting_continue: false,
            is_loading: false,
            is_submitting: false,
        }
    }

    /// Return every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn has_active_session(&self) -> bool {
        self.session_id.is_some()
    }

    /// Apply server-provided counters. Absent values keep the current ones.
    pub fn apply_server_counters(&mut self, score: Option<i64>, progress: Option<ProgressSnapshot>) {
        if let Some(score) = score {
            self.score = score;
        }
        if let Some(progress) = progress {
            self.progress = progress;
        }
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    #[must_use]
    pub fn concepts_label(&self) -> String {
        format!("Concepts Learned: {}", self.concepts_learned)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
