use quiz_core::model::{AnswerOption, ExplanationSegment, OptionKey};

/// Logical page elements the controller writes to.
///
/// Names are stable identifiers, not styling hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    StartScreen,
    LoadingScreen,
    QuizScreen,
    CompleteScreen,
    LoadingMessage,
    ProgressBar,
    ProgressText,
    CurrentScore,
    ConceptProgress,
    QuestionText,
    QuestionDifficulty,
    QuestionConcept,
    QuestionType,
    OptionsContainer,
    ResultsContainer,
    ResultStatus,
    ScoreChange,
    ExplanationContent,
    LearningProgress,
    FinalScore,
    TotalQuestions,
    ConceptsMastered,
    AccuracyRate,
    SubmitButton,
    NextButton,
    RestartButton,
    StartTopicButton,
    StartFileButton,
    TopicInput,
    FileInput,
}

impl ElementId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::StartScreen => "start-screen",
            ElementId::LoadingScreen => "loading-screen",
            ElementId::QuizScreen => "quiz-screen",
            ElementId::CompleteScreen => "session-complete",
            ElementId::LoadingMessage => "loading-message",
            ElementId::ProgressBar => "progress-bar",
            ElementId::ProgressText => "progress-text",
            ElementId::CurrentScore => "current-score",
            ElementId::ConceptProgress => "concept-progress",
            ElementId::QuestionText => "question-text",
            ElementId::QuestionDifficulty => "question-difficulty",
            ElementId::QuestionConcept => "question-concept",
            ElementId::QuestionType => "question-type",
            ElementId::OptionsContainer => "options-container",
            ElementId::ResultsContainer => "results-container",
            ElementId::ResultStatus => "result-status",
            ElementId::ScoreChange => "score-change",
            ElementId::ExplanationContent => "explanation-content",
            ElementId::LearningProgress => "learning-progress",
            ElementId::FinalScore => "final-score",
            ElementId::TotalQuestions => "total-questions",
            ElementId::ConceptsMastered => "concepts-mastered",
            ElementId::AccuracyRate => "accuracy-rate",
            ElementId::SubmitButton => "submit-btn",
            ElementId::NextButton => "next-btn",
            ElementId::RestartButton => "restart-btn",
            ElementId::StartTopicButton => "start-topic-btn",
            ElementId::StartFileButton => "start-file-btn",
            ElementId::TopicInput => "topic-input",
            ElementId::FileInput => "file-input",
        }
    }
}

/// Top-level screens. Exactly one is visible at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Start,
    Loading,
    Quiz,
    Complete,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Start, Screen::Loading, Screen::Quiz, Screen::Complete];

    #[must_use]
    pub fn element(self) -> ElementId {
        match self {
            Screen::Start => ElementId::StartScreen,
            Screen::Loading => ElementId::LoadingScreen,
            Screen::Quiz => ElementId::QuizScreen,
            Screen::Complete => ElementId::CompleteScreen,
        }
    }
}

/// Display surface the screen controller renders into.
///
/// Implementations use interior mutability so a single surface can be shared
/// between the orchestrator and whatever presents it. Methods must not call
/// back into the controller.
pub trait RenderTarget: Send + Sync {
    fn set_text(&self, element: ElementId, text: &str);
    /// Styling variant of an element, e.g. `easy` for a difficulty badge.
    fn set_tone(&self, element: ElementId, tone: &str);
    fn set_visible(&self, element: ElementId, visible: bool);
    fn set_enabled(&self, element: ElementId, enabled: bool);
    fn set_percent(&self, element: ElementId, percent: f64);
    fn set_options(&self, options: &[AnswerOption]);
    fn set_selected_option(&self, key: Option<&OptionKey>);
    fn set_explanation(&self, segments: &[ExplanationSegment]);
    fn reset_loading_steps(&self, count: usize);
    fn set_loading_step(&self, index: usize, active: bool);
    fn clear_input(&self, element: ElementId);
    /// Blocking notification shown to the learner.
    fn notify(&self, message: &str);
}
