use async_trait::async_trait;

use quiz_core::model::{
    AnswerResult, HealthStatus, OptionKey, ProgressReport, QuestionPayload, SessionId, StartMode,
};

use crate::error::ClientError;

/// Request/response surface of the progressive quiz backend.
///
/// Implementations are stateless transports: session continuity lives with
/// the caller.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Start a session and return its first question.
    async fn start_session(&self, mode: &StartMode) -> Result<QuestionPayload, ClientError>;

    /// Submit the chosen option, echoing the question it answers.
    async fn submit_answer(
        &self,
        session_id: &SessionId,
        selected_answer: &OptionKey,
        current_question: &QuestionPayload,
    ) -> Result<AnswerResult, ClientError>;

    async fn fetch_progress(&self, session_id: &SessionId) -> Result<ProgressReport, ClientError>;

    async fn health(&self) -> Result<HealthStatus, ClientError>;
}
