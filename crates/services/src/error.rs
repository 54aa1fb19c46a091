//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `RemoteSessionClient`.
///
/// Transport failures (including an elapsed request timeout and undecodable
/// bodies) are `Network`; any non-2xx answer is `Server`. The body of a failed
/// response is never parsed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("HTTP error! status: {}", .0.as_u16())]
    Server(reqwest::StatusCode),
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClientError::Server(status) => Some(*status),
            ClientError::Network(err) => err.status(),
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Network(err) if err.is_timeout())
    }
}
