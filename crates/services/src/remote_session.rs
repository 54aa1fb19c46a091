use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use quiz_core::model::{
    AnswerResult, HealthStatus, OptionKey, ProgressReport, QuestionPayload, SessionId, StartMode,
};

use crate::backend::QuizBackend;
use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

const START_PATH: &str = "start-progressive-session";
const SUBMIT_PATH: &str = "submit-progressive-answer";
const PROGRESS_PATH: &str = "get-session-progress";
const HEALTH_PATH: &str = "health";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSessionConfig {
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl RemoteSessionConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `QUIZ_API_BASE_URL` and `QUIZ_REQUEST_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("QUIZ_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let request_timeout = env::var("QUIZ_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Self {
            base_url,
            request_timeout,
        }
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for RemoteSessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP transport for the progressive quiz backend.
#[derive(Clone)]
pub struct RemoteSessionClient {
    client: Client,
    config: RemoteSessionConfig,
}

impl RemoteSessionClient {
    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(RemoteSessionConfig::from_env())
    }

    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn new(config: RemoteSessionConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RemoteSessionConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "posting to quiz backend");

        let response = self.client.post(&url).json(body).send().await.map_err(|err| {
            tracing::error!(%url, error = %err, "quiz backend request failed");
            ClientError::Network(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%url, %status, "quiz backend rejected request");
            return Err(ClientError::Server(status));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QuizBackend for RemoteSessionClient {
    /// Start a progressive session.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` when the transport fails and
    /// `ClientError::Server` for a non-success status.
    async fn start_session(&self, mode: &StartMode) -> Result<QuestionPayload, ClientError> {
        tracing::info!(kind = mode.kind(), "starting progressive session");
        self.post_json(START_PATH, mode).await
    }

    /// Submit an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` when the transport fails and
    /// `ClientError::Server` for a non-success status.
    async fn submit_answer(
        &self,
        session_id: &SessionId,
        selected_answer: &OptionKey,
        current_question: &QuestionPayload,
    ) -> Result<AnswerResult, ClientError> {
        tracing::info!(%session_id, %selected_answer, "submitting answer");
        let payload = SubmitRequest {
            session_id,
            selected_answer,
            current_question,
        };
        self.post_json(SUBMIT_PATH, &payload).await
    }

    async fn fetch_progress(&self, session_id: &SessionId) -> Result<ProgressReport, ClientError> {
        self.post_json(PROGRESS_PATH, &ProgressRequest { session_id })
            .await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.config.endpoint(HEALTH_PATH);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Server(status));
        }
        Ok(response.json().await?)
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    session_id: &'a SessionId,
    selected_answer: &'a OptionKey,
    current_question: &'a QuestionPayload,
}

#[derive(Debug, Serialize)]
struct ProgressRequest<'a> {
    session_id: &'a SessionId,
}
