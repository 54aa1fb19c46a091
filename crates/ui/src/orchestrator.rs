use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{AnswerResult, OptionKey, QuestionPayload, SessionId, SessionState, StartMode};
use services::QuizBackend;

use crate::config::UiConfig;
use crate::controller::{LOADING_MESSAGE, ScreenController};
use crate::error::QuizError;
use crate::render::Screen;

const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic to learn about";
const EMPTY_FILE_MESSAGE: &str = "Please choose a file to learn from";

/// Sequences user actions through the backend and the screen controller.
///
/// Owns the session state. The state lock is only held between suspension
/// points, never across a backend call or the completion delay.
pub struct SessionOrchestrator {
    backend: Arc<dyn QuizBackend>,
    controller: ScreenController,
    state: Mutex<SessionState>,
    config: UiConfig,
}

impl SessionOrchestrator {
    #[must_use]
    pub fn new(backend: Arc<dyn QuizBackend>, controller: ScreenController, config: UiConfig) -> Self {
        Self {
            backend,
            controller,
            state: Mutex::new(SessionState::new()),
            config,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a session about the given topic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Validation` for a blank topic (no request is made),
    /// `QuizError::Client` when the backend call fails and
    /// `QuizError::MissingSessionId` when the first question carries no id.
    pub async fn start_topic_session(&self, topic: &str) -> Result<(), QuizError> {
        let mode = StartMode::topic(topic).inspect_err(|_| {
            self.controller.show_error(EMPTY_TOPIC_MESSAGE);
        })?;
        self.start_session(mode).await
    }

    /// Start a session seeded from a picked file.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start_topic_session`].
    pub async fn start_file_session(&self, file_name: &str) -> Result<(), QuizError> {
        let mode = StartMode::file(file_name).inspect_err(|_| {
            self.controller.show_error(EMPTY_FILE_MESSAGE);
        })?;
        self.start_session(mode).await
    }

    async fn start_session(&self, mode: StartMode) -> Result<(), QuizError> {
        {
            let mut state = self.lock_state();
            if state.is_loading {
                tracing::debug!("session start already in flight; ignoring");
                return Ok(());
            }
            state.is_loading = true;
        }

        self.controller
            .show_loading(LOADING_MESSAGE, self.config.loading_steps);

        let result = tokio::select! {
            result = self.backend.start_session(&mode) => result,
            never = self.animate_loading_steps() => match never {},
        };

        let outcome = match result {
            Ok(question) => self.accept_first_question(question),
            Err(err) => Err(QuizError::from(err)),
        };

        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "failed to start session");
            self.controller
                .show_error(&format!("Failed to start session: {err}"));
            self.controller.show_screen(Screen::Start);
        }

        self.lock_state().is_loading = false;
        outcome
    }

    fn accept_first_question(&self, question: QuestionPayload) -> Result<(), QuizError> {
        let session_id = question
            .session_id
            .clone()
            .ok_or(QuizError::MissingSessionId)?;
        tracing::info!(%session_id, "session started");

        let mut state = self.lock_state();
        state.session_id = Some(session_id);
        self.controller.display_question(&mut state, &question);
        state.current_question = Some(question);
        Ok(())
    }

    /// Cosmetic progress animation; runs until the caller drops it.
    async fn animate_loading_steps(&self) -> Infallible {
        for index in 0..self.config.loading_steps {
            tokio::time::sleep(self.config.loading_step_interval).await;
            self.controller.activate_loading_step(index);
        }
        std::future::pending().await
    }

    /// Record the learner's pick for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AwaitingContinue` while the results for the last
    /// answer are showing, and `QuizError::UnknownOption` when the key is not
    /// one of the current question's options.
    pub fn select_option(&self, key: &str) -> Result<(), QuizError> {
        let mut state = self.lock_state();
        if state.awaiting_continue {
            return Err(QuizError::AwaitingContinue);
        }
        let offered = state
            .current_question
            .as_ref()
            .and_then(|question| {
                let key = OptionKey::new(key).ok()?;
                question.options.contains(&key).then_some(key)
            });
        let Some(key) = offered else {
            return Err(QuizError::UnknownOption(key.to_string()));
        };

        self.controller.mark_selection(&key);
        state.selected_answer = Some(key);
        Ok(())
    }

    /// Submit the selected option.
    ///
    /// Does nothing without a selection, an active session and a current
    /// question, while another submit is in flight, or while the results for
    /// the previous answer are still showing. When the result
    /// completes the session, the completion screen follows after the
    /// configured delay.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Client` when the backend call fails; the learner
    /// stays on the quiz screen and may retry.
    pub async fn submit_answer(&self) -> Result<(), QuizError> {
        let (session_id, selected, question) = {
            let mut state = self.lock_state();
            let (Some(session_id), Some(selected), Some(question)) = (
                state.session_id.clone(),
                state.selected_answer.clone(),
                state.current_question.clone(),
            ) else {
                return Ok(());
            };
            if state.is_submitting || state.awaiting_continue {
                return Ok(());
            }
            state.is_submitting = true;
            (session_id, selected, question)
        };

        self.controller.set_submit_busy(true);
        let result = self
            .backend
            .submit_answer(&session_id, &selected, &question)
            .await;

        let outcome = match result {
            Ok(answer) => {
                self.accept_answer(&answer);
                Ok(answer)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to submit answer");
                self.controller
                    .show_error(&format!("Failed to submit answer: {err}"));
                Err(QuizError::from(err))
            }
        };

        self.lock_state().is_submitting = false;
        self.controller.set_submit_busy(false);

        let answer = outcome?;
        if answer.session_complete {
            self.complete_after_delay(&session_id, &answer).await;
        }
        Ok(())
    }

    fn accept_answer(&self, answer: &AnswerResult) {
        let mut state = self.lock_state();
        self.controller.display_results(&mut state, answer);
        state.selected_answer = None;
        state.awaiting_continue = true;
        if let Some(next) = &answer.next_question {
            state.current_question = Some(next.clone());
        }
        if answer.session_complete {
            state.session_complete = true;
        }
        tracing::info!(
            is_correct = answer.is_correct,
            score = state.score,
            complete = answer.session_complete,
            "answer recorded"
        );
    }

    async fn complete_after_delay(&self, session_id: &SessionId, answer: &AnswerResult) {
        tokio::time::sleep(self.config.completion_delay).await;

        let mut state = self.lock_state();
        if state.session_id.as_ref() != Some(session_id) {
            tracing::debug!(%session_id, "session restarted before completion screen");
            return;
        }
        self.controller.show_session_complete(&mut state, answer);
        tracing::info!(%session_id, final_score = state.score, "session complete");
    }

    /// Show the already-fetched next question. No network call.
    ///
    /// Returns `false` when there is nothing to show.
    pub fn continue_to_next_question(&self) -> bool {
        let mut state = self.lock_state();
        if state.session_complete {
            return false;
        }
        let Some(question) = state.current_question.clone() else {
            return false;
        };
        self.controller.display_question(&mut state, &question);
        true
    }

    /// Pull the server's view of the session into the header.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Client` when the backend call fails.
    pub async fn refresh_progress(&self) -> Result<(), QuizError> {
        let Some(session_id) = self.lock_state().session_id.clone() else {
            return Ok(());
        };

        match self.backend.fetch_progress(&session_id).await {
            Ok(report) => {
                let mut state = self.lock_state();
                if state.session_id.as_ref() != Some(&report.session_id) {
                    return Ok(());
                }
                state.score = report.score;
                state.progress = report.progress;
                state.concepts_learned = report.learned_concepts;
                self.controller.update_progress(&state);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to refresh progress");
                self.controller
                    .show_error(&format!("Failed to refresh progress: {err}"));
                Err(err.into())
            }
        }
    }

    /// Drop the session and go back to the start screen.
    pub fn restart_session(&self) {
        let mut state = self.lock_state();
        state.reset();
        self.controller.set_submit_busy(false);
        self.controller.clear_completion();
        self.controller.show_screen(Screen::Start);
        self.controller.reset_inputs();
        tracing::info!("session reset");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use quiz_core::model::{HealthStatus, ProgressReport, ProgressSnapshot};
    use services::{ClientError, StatusCode};
    use tokio::sync::Notify;

    use super::*;
    use crate::page::{PageModel, SharedPage};
    use crate::render::ElementId;

    type Reply<T> = Result<T, StatusCode>;

    #[derive(Default)]
    struct FakeBackend {
        starts: Mutex<VecDeque<Reply<QuestionPayload>>>,
        answers: Mutex<VecDeque<Reply<AnswerResult>>>,
        reports: Mutex<VecDeque<Reply<ProgressReport>>>,
        start_calls: AtomicUsize,
        submitted: Mutex<Vec<(SessionId, OptionKey, QuestionPayload)>>,
        start_gate: Option<Arc<Notify>>,
    }

    impl FakeBackend {
        fn with_start(self, reply: Reply<QuestionPayload>) -> Self {
            self.starts.lock().unwrap().push_back(reply);
            self
        }

        fn with_answer(self, reply: Reply<AnswerResult>) -> Self {
            self.answers.lock().unwrap().push_back(reply);
            self
        }

        fn with_report(self, reply: Reply<ProgressReport>) -> Self {
            self.reports.lock().unwrap().push_back(reply);
            self
        }

        fn submitted(&self) -> Vec<(SessionId, OptionKey, QuestionPayload)> {
            self.submitted.lock().unwrap().clone()
        }
    }

    fn pop<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Result<T, ClientError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected backend call")
            .map_err(ClientError::Server)
    }

    #[async_trait]
    impl QuizBackend for FakeBackend {
        async fn start_session(&self, _mode: &StartMode) -> Result<QuestionPayload, ClientError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.start_gate {
                gate.notified().await;
            }
            pop(&self.starts)
        }

        async fn submit_answer(
            &self,
            session_id: &SessionId,
            selected_answer: &OptionKey,
            current_question: &QuestionPayload,
        ) -> Result<AnswerResult, ClientError> {
            self.submitted.lock().unwrap().push((
                session_id.clone(),
                selected_answer.clone(),
                current_question.clone(),
            ));
            pop(&self.answers)
        }

        async fn fetch_progress(&self, _session_id: &SessionId) -> Result<ProgressReport, ClientError> {
            pop(&self.reports)
        }

        async fn health(&self) -> Result<HealthStatus, ClientError> {
            Err(ClientError::Server(StatusCode::NOT_FOUND))
        }
    }

    struct Harness {
        orchestrator: SessionOrchestrator,
        backend: Arc<FakeBackend>,
        page: SharedPage,
    }

    fn harness(backend: FakeBackend) -> Harness {
        let config = UiConfig {
            completion_delay: Duration::from_secs(3),
            loading_step_interval: Duration::from_millis(10),
            loading_steps: 4,
        };
        let page = SharedPage::new(PageModel::new(config.loading_steps));
        let backend = Arc::new(backend);
        let controller = ScreenController::new(Arc::new(page.clone()));
        let orchestrator = SessionOrchestrator::new(backend.clone(), controller, config);
        Harness {
            orchestrator,
            backend,
            page,
        }
    }

    fn question(text: &str, keys: &[&str]) -> QuestionPayload {
        let options: serde_json::Map<String, serde_json::Value> = keys
            .iter()
            .map(|key| ((*key).to_string(), format!("option {key}").into()))
            .collect();
        serde_json::from_value(serde_json::json!({
            "session_id": "sess-1",
            "question": text,
            "options": options,
            "correct_answer": keys[0],
            "progress": {"current_question": 1, "total_questions": 3, "completed": 0, "remaining": 3, "progress_percentage": 0},
            "score": 100
        }))
        .unwrap()
    }

    fn answer(is_correct: bool, score: i64, next: Option<QuestionPayload>) -> AnswerResult {
        AnswerResult {
            is_correct,
            score: Some(score),
            explanation: Some("Because.".into()),
            next_question: next,
            ..AnswerResult::default()
        }
    }

    #[tokio::test]
    async fn start_renders_first_question() {
        let h = harness(FakeBackend::default().with_start(Ok(question("First?", &["A", "B"]))));

        h.orchestrator.start_topic_session("  Rust  ").await.unwrap();

        let state = h.orchestrator.state();
        assert_eq!(state.session_id, Some(SessionId::new("sess-1").unwrap()));
        assert_eq!(state.current_question.map(|q| q.question), Some("First?".into()));
        assert!(!state.is_loading);

        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Quiz));
        assert_eq!(page.options().len(), 2);
        assert!(!page.is_enabled(ElementId::SubmitButton));
        assert_eq!(page.text(ElementId::LoadingMessage), LOADING_MESSAGE);
    }

    #[tokio::test]
    async fn blank_topic_is_rejected_before_any_request() {
        let h = harness(FakeBackend::default());

        let err = h.orchestrator.start_topic_session("   ").await.unwrap_err();

        assert!(matches!(err, QuizError::Validation(_)));
        assert_eq!(h.backend.start_calls.load(Ordering::SeqCst), 0);
        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Start));
        assert_eq!(
            page.notifications(),
            ["Error: Please enter a topic to learn about".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_start_returns_to_start_screen() {
        let h = harness(FakeBackend::default().with_start(Err(StatusCode::INTERNAL_SERVER_ERROR)));

        let err = h.orchestrator.start_topic_session("Rust").await.unwrap_err();

        assert!(matches!(err, QuizError::Client(ClientError::Server(_))));
        assert_eq!(h.orchestrator.state(), SessionState::new());
        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Start));
        assert_eq!(
            page.notifications(),
            ["Error: Failed to start session: HTTP error! status: 500".to_string()]
        );
    }

    #[tokio::test]
    async fn start_without_session_id_is_an_error() {
        let mut first = question("First?", &["A"]);
        first.session_id = None;
        let h = harness(FakeBackend::default().with_start(Ok(first)));

        let err = h.orchestrator.start_topic_session("Rust").await.unwrap_err();

        assert!(matches!(err, QuizError::MissingSessionId));
        assert_eq!(h.orchestrator.state(), SessionState::new());
        assert_eq!(h.page.snapshot().active_screen(), Some(Screen::Start));
    }

    #[tokio::test]
    async fn blank_session_id_from_server_is_missing() {
        let mut raw = serde_json::to_value(question("First?", &["A"])).unwrap();
        raw["session_id"] = "".into();
        let first: QuestionPayload = serde_json::from_value(raw).unwrap();
        let h = harness(FakeBackend::default().with_start(Ok(first)));

        let err = h.orchestrator.start_topic_session("Rust").await.unwrap_err();

        assert!(matches!(err, QuizError::MissingSessionId));
        assert_eq!(h.orchestrator.state(), SessionState::new());
        assert_eq!(h.page.snapshot().active_screen(), Some(Screen::Start));
    }

    #[tokio::test]
    async fn second_start_while_loading_makes_no_request() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            start_gate: Some(gate.clone()),
            ..FakeBackend::default()
        }
        .with_start(Ok(question("First?", &["A", "B"])));
        let h = harness(backend);

        let (first, second, ()) = tokio::join!(
            h.orchestrator.start_topic_session("Rust"),
            h.orchestrator.start_topic_session("Rust"),
            async { gate.notify_one() },
        );

        first.unwrap();
        second.unwrap();
        assert_eq!(h.backend.start_calls.load(Ordering::SeqCst), 1);
        assert!(!h.orchestrator.state().is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_steps_animate_while_request_is_pending() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            start_gate: Some(gate.clone()),
            ..FakeBackend::default()
        }
        .with_start(Ok(question("First?", &["A"])));
        let h = harness(backend);

        let release = async {
            tokio::time::sleep(Duration::from_millis(25)).await;
            assert_eq!(h.page.snapshot().loading_steps(), [true, true, false, false]);
            gate.notify_one();
        };
        let (started, ()) = tokio::join!(h.orchestrator.start_topic_session("Rust"), release);

        started.unwrap();
        assert_eq!(h.page.snapshot().active_screen(), Some(Screen::Quiz));
    }

    #[tokio::test]
    async fn selecting_enables_submit_and_new_question_clears_it() {
        let next = question("Second?", &["A", "B"]);
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("First?", &["A", "B"])))
                .with_answer(Ok(answer(true, 110, Some(next)))),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();

        h.orchestrator.select_option("B").unwrap();
        assert!(h.page.snapshot().is_enabled(ElementId::SubmitButton));
        assert_eq!(
            h.orchestrator.state().selected_answer,
            Some(OptionKey::new("B").unwrap())
        );

        h.orchestrator.submit_answer().await.unwrap();
        assert!(h.orchestrator.continue_to_next_question());

        let page = h.page.snapshot();
        assert_eq!(page.text(ElementId::QuestionText), "Second?");
        assert!(!page.is_enabled(ElementId::SubmitButton));
        assert_eq!(page.selected_option(), None);
        assert_eq!(h.orchestrator.state().selected_answer, None);
    }

    #[tokio::test]
    async fn results_block_input_until_continue() {
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("First?", &["A", "B"])))
                .with_answer(Ok(answer(true, 110, Some(question("Second?", &["A", "B"]))))),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("A").unwrap();
        h.orchestrator.submit_answer().await.unwrap();

        let err = h.orchestrator.select_option("B").unwrap_err();
        assert!(matches!(err, QuizError::AwaitingContinue));
        assert_eq!(h.page.snapshot().selected_option(), None);

        h.orchestrator.submit_answer().await.unwrap();
        assert_eq!(h.backend.submitted().len(), 1);

        assert!(h.orchestrator.continue_to_next_question());
        h.orchestrator.select_option("B").unwrap();
        assert!(!h.orchestrator.state().awaiting_continue);
        assert!(h.page.snapshot().is_enabled(ElementId::SubmitButton));
    }

    #[tokio::test]
    async fn unknown_option_is_rejected() {
        let h = harness(FakeBackend::default().with_start(Ok(question("First?", &["A", "B"]))));
        h.orchestrator.start_topic_session("Rust").await.unwrap();

        let err = h.orchestrator.select_option("E").unwrap_err();

        assert!(matches!(err, QuizError::UnknownOption(key) if key == "E"));
        assert!(!h.page.snapshot().is_enabled(ElementId::SubmitButton));
    }

    #[tokio::test]
    async fn submit_echoes_question_and_shows_cosmetic_delta() {
        let first = question("First?", &["A", "B"]);
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(first.clone()))
                .with_answer(Ok(answer(true, 42, Some(question("Second?", &["C"]))))),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("A").unwrap();

        h.orchestrator.submit_answer().await.unwrap();

        let submitted = h.backend.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].0.as_str(), "sess-1");
        assert_eq!(submitted[0].1.as_str(), "A");
        assert_eq!(submitted[0].2, first);

        let page = h.page.snapshot();
        assert_eq!(page.text(ElementId::ScoreChange), "+10 points");
        assert_eq!(page.text(ElementId::CurrentScore), "Score: 42");
        assert!(page.is_visible(ElementId::ResultsContainer));
        assert_eq!(page.active_screen(), Some(Screen::Quiz));
        assert!(page.is_enabled(ElementId::SubmitButton));
        assert_eq!(page.text(ElementId::SubmitButton), "Submit Answer");

        let state = h.orchestrator.state();
        assert_eq!(state.score, 42);
        assert_eq!(state.current_question.map(|q| q.question), Some("Second?".into()));
        assert_eq!(state.selected_answer, None);
    }

    #[tokio::test]
    async fn wrong_answer_shows_negative_delta() {
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("First?", &["A", "B"])))
                .with_answer(Ok(answer(false, 300, None))),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("B").unwrap();

        h.orchestrator.submit_answer().await.unwrap();

        assert_eq!(h.page.snapshot().text(ElementId::ScoreChange), "-5 points");
        assert_eq!(h.orchestrator.state().score, 300);
    }

    #[tokio::test]
    async fn failed_submit_keeps_quiz_and_allows_retry() {
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("First?", &["A", "B"])))
                .with_answer(Err(StatusCode::BAD_GATEWAY))
                .with_answer(Ok(answer(true, 110, None))),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("A").unwrap();

        let err = h.orchestrator.submit_answer().await.unwrap_err();
        assert!(matches!(err, QuizError::Client(_)));

        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Quiz));
        assert!(page.is_enabled(ElementId::SubmitButton));
        assert_eq!(
            page.notifications(),
            ["Error: Failed to submit answer: HTTP error! status: 502".to_string()]
        );
        assert!(!h.orchestrator.state().is_submitting);

        h.orchestrator.submit_answer().await.unwrap();
        assert_eq!(h.backend.submitted().len(), 2);
    }

    #[tokio::test]
    async fn submit_without_selection_makes_no_request() {
        let h = harness(FakeBackend::default().with_start(Ok(question("First?", &["A"]))));
        h.orchestrator.start_topic_session("Rust").await.unwrap();

        h.orchestrator.submit_answer().await.unwrap();

        assert!(h.backend.submitted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_screen_waits_for_delay() {
        let complete = AnswerResult {
            is_correct: true,
            session_complete: true,
            final_score: Some(110),
            total_questions: Some(1),
            learned_concepts: Some(1),
            summary: Some(quiz_core::model::AnswerSummary {
                correct_answers: 3,
                incorrect_answers: 1,
            }),
            ..AnswerResult::default()
        };
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("Only?", &["A", "B"])))
                .with_answer(Ok(complete)),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("A").unwrap();

        let submit = h.orchestrator.submit_answer();
        tokio::pin!(submit);
        let early = tokio::time::timeout(Duration::from_secs(1), &mut submit).await;
        assert!(early.is_err(), "completion should still be pending");

        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Quiz));
        assert!(page.is_visible(ElementId::ResultsContainer));
        assert!(page.is_enabled(ElementId::SubmitButton));
        assert!(!h.orchestrator.continue_to_next_question());

        submit.await.unwrap();
        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Complete));
        assert_eq!(page.text(ElementId::AccuracyRate), "75%");
        assert_eq!(page.text(ElementId::FinalScore), "Final Score: 110");
        assert!(h.orchestrator.state().session_complete);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_during_delay_suppresses_completion() {
        let complete = AnswerResult {
            session_complete: true,
            ..AnswerResult::default()
        };
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("Only?", &["A"])))
                .with_answer(Ok(complete)),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("A").unwrap();

        let restart = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            h.orchestrator.restart_session();
        };
        let (submitted, ()) = tokio::join!(h.orchestrator.submit_answer(), restart);

        submitted.unwrap();
        assert_eq!(h.page.snapshot().active_screen(), Some(Screen::Start));
        assert_eq!(h.orchestrator.state(), SessionState::new());
    }

    #[tokio::test]
    async fn restart_resets_state_and_inputs() {
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("First?", &["A", "B"])))
                .with_answer(Ok(answer(false, 95, None))),
        );
        h.page.set_input(ElementId::TopicInput, "Rust".into());
        h.page.set_input(ElementId::FileInput, "notes.pdf".into());
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("B").unwrap();
        h.orchestrator.submit_answer().await.unwrap();

        h.orchestrator.restart_session();

        assert_eq!(h.orchestrator.state(), SessionState::new());
        let page = h.page.snapshot();
        assert_eq!(page.active_screen(), Some(Screen::Start));
        assert_eq!(page.input(ElementId::TopicInput), "");
        assert_eq!(page.input(ElementId::FileInput), "");
        assert!(!page.is_enabled(ElementId::StartFileButton));
        assert!(!h.orchestrator.continue_to_next_question());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_clears_previous_completion_stats() {
        let complete = AnswerResult {
            session_complete: true,
            final_score: Some(130),
            summary: Some(quiz_core::model::AnswerSummary {
                correct_answers: 1,
                incorrect_answers: 1,
            }),
            ..AnswerResult::default()
        };
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("Only?", &["A"])))
                .with_answer(Ok(complete)),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();
        h.orchestrator.select_option("A").unwrap();
        h.orchestrator.submit_answer().await.unwrap();
        assert_eq!(h.page.snapshot().text(ElementId::AccuracyRate), "50%");

        h.orchestrator.restart_session();

        let page = h.page.snapshot();
        assert_eq!(page.text(ElementId::AccuracyRate), "");
        assert_eq!(page.text(ElementId::FinalScore), "");
        assert_eq!(page.text(ElementId::TotalQuestions), "");
        assert_eq!(page.text(ElementId::ConceptsMastered), "");
    }

    #[tokio::test]
    async fn refresh_progress_updates_header() {
        let report = ProgressReport {
            session_id: SessionId::new("sess-1").unwrap(),
            progress: ProgressSnapshot {
                current_question: 2,
                total_questions: 3,
                completed: 1,
                remaining: 2,
                progress_percentage: 33.3,
            },
            score: 110,
            learned_concepts: 1,
            total_concepts: 3,
            correct_answers: 1,
            incorrect_answers: 0,
            completed: false,
        };
        let h = harness(
            FakeBackend::default()
                .with_start(Ok(question("First?", &["A"])))
                .with_report(Ok(report)),
        );
        h.orchestrator.start_topic_session("Rust").await.unwrap();

        h.orchestrator.refresh_progress().await.unwrap();

        let state = h.orchestrator.state();
        assert_eq!(state.score, 110);
        assert_eq!(state.concepts_learned, 1);
        let page = h.page.snapshot();
        assert_eq!(page.text(ElementId::ProgressText), "Question 2 of 3");
        assert_eq!(page.text(ElementId::ConceptProgress), "Concepts Learned: 1");
    }

    #[tokio::test]
    async fn refresh_progress_without_session_is_noop() {
        let h = harness(FakeBackend::default());
        h.orchestrator.refresh_progress().await.unwrap();
        assert!(h.page.snapshot().notifications().is_empty());
    }

    #[tokio::test]
    async fn blank_file_name_is_rejected() {
        let h = harness(FakeBackend::default());

        let err = h.orchestrator.start_file_session("").await.unwrap_err();

        assert!(matches!(err, QuizError::Validation(_)));
        assert_eq!(h.backend.start_calls.load(Ordering::SeqCst), 0);
    }
}
