use serde::{Deserialize, Serialize};

use crate::model::{ProgressSnapshot, SessionId};

/// Server-side view of a session's standing, returned by the progress call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub session_id: SessionId,
    #[serde(default)]
    pub progress: ProgressSnapshot,
    pub score: i64,
    #[serde(default)]
    pub learned_concepts: u32,
    #[serde(default)]
    pub total_concepts: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub incorrect_answers: u32,
    #[serde(default)]
    pub completed: bool,
}

/// Backend liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub active_sessions: u32,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
