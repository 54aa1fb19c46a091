use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::{AnswerResult, AnswerSummary, HealthStatus, OptionKey, ProgressReport};
use quiz_core::model::{QuestionPayload, SessionId, SessionState, StartMode};
use services::{ClientError, QuizBackend, StatusCode};

use super::{QuizPage, QuizView};
use crate::config::UiConfig;
use crate::context::{UiApp, build_app_context};
use crate::controller::{LOADING_MESSAGE, ScreenController};
use crate::page::{PageModel, SharedPage};
use crate::render::Screen;

#[component]
fn PageHarness(page: PageModel) -> Element {
    rsx! {
        QuizPage { page, on_action: move |_| {} }
    }
}

fn render_page(page: PageModel) -> String {
    let mut dom = VirtualDom::new_with_props(PageHarness, PageHarnessProps { page });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

fn driven_page() -> (ScreenController, SharedPage) {
    let page = SharedPage::new(PageModel::new(4));
    (ScreenController::new(Arc::new(page.clone())), page)
}

fn question() -> QuestionPayload {
    serde_json::from_value(serde_json::json!({
        "session_id": "sess-1",
        "question": "Which keyword moves captures into a closure?",
        "options": {"A": "ref", "B": "move"},
        "difficulty": "hard",
        "teaching_focus": "Closures",
        "is_mastery_question": true,
        "progress": {"current_question": 2, "total_questions": 4, "completed": 1, "remaining": 3, "progress_percentage": 25},
        "score": 105
    }))
    .unwrap()
}

#[test]
fn start_screen_smoke_renders_inputs() {
    let html = render_page(PageModel::new(4));
    assert!(html.contains("What would you like to learn?"), "missing heading in {html}");
    assert!(html.contains("topic-input"), "missing topic input in {html}");
    assert!(html.contains("Learn from File"), "missing file button in {html}");
    assert!(!html.contains("quiz-screen"), "quiz screen leaked into {html}");
}

#[test]
fn loading_screen_smoke_marks_active_steps() {
    let (controller, page) = driven_page();
    controller.show_loading(LOADING_MESSAGE, 4);
    controller.activate_loading_step(0);

    let html = render_page(page.snapshot());
    assert!(html.contains(LOADING_MESSAGE), "missing message in {html}");
    assert!(html.contains("step active"), "missing active step in {html}");
    assert!(html.contains("Preparing your session"), "missing step label in {html}");
}

#[test]
fn quiz_screen_smoke_renders_question() {
    let (controller, page) = driven_page();
    let mut state = SessionState::new();
    controller.display_question(&mut state, &question());
    controller.mark_selection(&OptionKey::new("B").unwrap());

    let html = render_page(page.snapshot());
    assert!(html.contains("Which keyword moves captures into a closure?"), "missing question in {html}");
    assert!(html.contains("difficulty hard"), "missing difficulty in {html}");
    assert!(html.contains("Concept: Closures"), "missing concept in {html}");
    assert!(html.contains("🎯 Mastery Check"), "missing badge in {html}");
    assert!(html.contains("Question 2 of 4"), "missing progress in {html}");
    assert!(html.contains("Score: 105"), "missing score in {html}");
    assert!(html.contains("width: 25%"), "missing bar width in {html}");
    assert!(html.contains("option selected"), "missing selection in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
    assert!(!html.contains("Continue"), "results leaked into {html}");
}

#[test]
fn results_smoke_renders_split_explanation() {
    let (controller, page) = driven_page();
    let mut state = SessionState::new();
    controller.display_question(&mut state, &question());
    let result = AnswerResult {
        is_correct: false,
        score: Some(100),
        explanation: Some("❌ Your answer (A): ref borrows\n\n✅ Correct answer (B): move".into()),
        ..AnswerResult::default()
    };
    controller.display_results(&mut state, &result);

    let html = render_page(page.snapshot());
    assert!(html.contains("❌ Incorrect"), "missing status in {html}");
    assert!(html.contains("-5 points"), "missing delta in {html}");
    assert!(html.contains("explanation-wrong"), "missing wrong segment in {html}");
    assert!(html.contains("explanation-correct"), "missing correct segment in {html}");
    assert!(html.contains("Continue"), "missing continue in {html}");
    assert!(!html.contains("Submit Answer"), "submit still shown in {html}");
}

#[test]
fn complete_screen_smoke_renders_stats() {
    let (controller, page) = driven_page();
    let mut state = SessionState::new();
    let result = AnswerResult {
        session_complete: true,
        final_score: Some(140),
        total_questions: Some(6),
        learned_concepts: Some(4),
        summary: Some(AnswerSummary {
            correct_answers: 4,
            incorrect_answers: 2,
        }),
        ..AnswerResult::default()
    };
    controller.show_session_complete(&mut state, &result);

    let snapshot = page.snapshot();
    assert_eq!(snapshot.active_screen(), Some(Screen::Complete));
    let html = render_page(snapshot);
    assert!(html.contains("Final Score: 140"), "missing final score in {html}");
    assert!(html.contains("67%"), "missing accuracy in {html}");
    assert!(html.contains("Start a new topic"), "missing restart in {html}");
}

#[test]
fn notification_smoke_renders_modal() {
    let (controller, page) = driven_page();
    controller.show_error("Failed to start session: HTTP error! status: 500");

    let html = render_page(page.snapshot());
    assert!(
        html.contains("Error: Failed to start session: HTTP error! status: 500"),
        "missing notification in {html}"
    );
}

struct OfflineBackend;

#[async_trait::async_trait]
impl QuizBackend for OfflineBackend {
    async fn start_session(&self, _mode: &StartMode) -> Result<QuestionPayload, ClientError> {
        Err(ClientError::Server(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn submit_answer(
        &self,
        _session_id: &SessionId,
        _selected_answer: &OptionKey,
        _current_question: &QuestionPayload,
    ) -> Result<AnswerResult, ClientError> {
        Err(ClientError::Server(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn fetch_progress(&self, _session_id: &SessionId) -> Result<ProgressReport, ClientError> {
        Err(ClientError::Server(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        Err(ClientError::Server(StatusCode::SERVICE_UNAVAILABLE))
    }
}

struct TestApp;

impl UiApp for TestApp {
    fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::new(OfflineBackend)
    }

    fn config(&self) -> UiConfig {
        UiConfig::default()
    }
}

#[component]
fn ViewHarness() -> Element {
    let app: Arc<dyn UiApp> = Arc::new(TestApp);
    use_context_provider(|| build_app_context(&app));
    rsx! { QuizView {} }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_starts_on_start_screen() {
    let mut dom = VirtualDom::new(ViewHarness);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Progressive Quiz"), "missing title in {html}");
    assert!(html.contains("Start Learning"), "missing start button in {html}");
}
