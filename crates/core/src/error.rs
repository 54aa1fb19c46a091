use thiserror::Error;

/// Validation failures for values the client builds or receives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("session id must not be empty")]
    EmptySessionId,
    #[error("option key must not be empty")]
    EmptyOptionKey,
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("file name must not be empty")]
    EmptyFileName,
}
