use serde::{Deserialize, Serialize};

use crate::model::{ProgressSnapshot, QuestionPayload};

/// Points shown next to a correct answer. Display only, never stored.
pub const CORRECT_DELTA: i64 = 10;
/// Points shown next to an incorrect answer. Display only, never stored.
pub const INCORRECT_DELTA: i64 = -5;

/// Right/wrong tallies reported with a completed session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerSummary {
    pub correct_answers: u32,
    pub incorrect_answers: u32,
}

impl AnswerSummary {
    /// Whole-number accuracy, `0` when nothing was answered.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accuracy_percent(&self) -> u32 {
        let total = self.correct_answers + self.incorrect_answers;
        if total == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct_answers) / f64::from(total);
        // ratio is within [0, 1], so the rounded value always fits.
        (ratio * 100.0).round() as u32
    }
}

/// Backend verdict for a submitted answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub session_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learned_concepts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnswerSummary>,
}

impl AnswerResult {
    /// Cosmetic score change shown with the result.
    ///
    /// This is not reconciled with the server `score`; the stored score always
    /// comes from the server.
    #[must_use]
    pub fn display_delta(&self) -> i64 {
        if self.is_correct {
            CORRECT_DELTA
        } else {
            INCORRECT_DELTA
        }
    }

    #[must_use]
    pub fn delta_label(&self) -> String {
        format!("{:+} points", self.display_delta())
    }
}
