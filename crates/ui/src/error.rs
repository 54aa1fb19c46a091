use thiserror::Error;

use quiz_core::ModelError;
use services::ClientError;

/// Failures at the orchestrator boundary.
///
/// Validation, client and missing-id failures have already been shown to the
/// learner as a notification when they are returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Validation(#[from] ModelError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("server response did not include a session id")]
    MissingSessionId,
    #[error("option {0} is not offered by the current question")]
    UnknownOption(String),
    #[error("results are showing; continue to the next question first")]
    AwaitingContinue,
}
