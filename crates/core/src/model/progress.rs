use serde::{Deserialize, Serialize};

/// Server-provided position of the learner within a session.
///
/// Always replaced wholesale from a server payload; the client never
/// recomputes these counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSnapshot {
    pub current_question: u32,
    pub total_questions: u32,
    pub completed: u32,
    pub remaining: u32,
    pub progress_percentage: f64,
}

impl ProgressSnapshot {
    /// Width of the progress bar in percent, derived from `completed / total`.
    ///
    /// Returns `None` while the total is unknown (zero), in which case the bar
    /// keeps its previous width.
    #[must_use]
    pub fn bar_percent(&self) -> Option<f64> {
        if self.total_questions == 0 {
            return None;
        }
        Some(f64::from(self.completed) / f64::from(self.total_questions) * 100.0)
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "Question {} of {}",
            self.current_question, self.total_questions
        )
    }
}
