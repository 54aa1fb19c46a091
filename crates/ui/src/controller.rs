use std::sync::Arc;

use quiz_core::model::{
    AnswerResult, ExplanationSegment, OptionKey, QuestionPayload, SessionState, split_explanation,
};

use crate::render::{ElementId, RenderTarget, Screen};

pub const LOADING_MESSAGE: &str = "Creating your progressive learning plan...";
pub const SUBMIT_LABEL: &str = "Submit Answer";
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";

const MASTERY_BADGE: &str = "🎯 Mastery Check";
const TEACHING_BADGE: &str = "🎓 Teaching Question";
const CORRECT_STATUS: &str = "✅ Correct!";
const INCORRECT_STATUS: &str = "❌ Incorrect";
const CORRECT_NOTE: &str = "🎉 Great job! Moving to the next concept...";
const MASTERY_NOTE: &str = "🎯 Added mastery questions to help you learn this concept better";

/// Renders session state and server payloads onto a `RenderTarget`.
///
/// Owns the screen exclusivity invariant: every screen change goes through
/// `show_screen`.
#[derive(Clone)]
pub struct ScreenController {
    target: Arc<dyn RenderTarget>,
}

impl ScreenController {
    #[must_use]
    pub fn new(target: Arc<dyn RenderTarget>) -> Self {
        Self { target }
    }

    pub fn show_screen(&self, screen: Screen) {
        for candidate in Screen::ALL {
            self.target
                .set_visible(candidate.element(), candidate == screen);
        }
        tracing::debug!(?screen, "screen shown");
    }

    pub fn show_loading(&self, message: &str, steps: usize) {
        self.target.set_text(ElementId::LoadingMessage, message);
        self.target.reset_loading_steps(steps);
        self.show_screen(Screen::Loading);
    }

    pub fn activate_loading_step(&self, index: usize) {
        self.target.set_loading_step(index, true);
    }

    /// Render a question and switch to the quiz screen.
    ///
    /// Embedded progress and score are applied to `state`; the selection is
    /// cleared and submission stays disabled until an option is picked.
    pub fn display_question(&self, state: &mut SessionState, question: &QuestionPayload) {
        let target = &self.target;
        target.set_text(ElementId::QuestionText, &question.question);
        target.set_text(ElementId::QuestionDifficulty, question.difficulty_label());
        target.set_tone(ElementId::QuestionDifficulty, &question.difficulty_tone());
        target.set_text(ElementId::QuestionConcept, &question.concept_label());
        if question.is_mastery_question {
            target.set_text(ElementId::QuestionType, MASTERY_BADGE);
            target.set_tone(ElementId::QuestionType, "mastery-indicator");
        } else {
            target.set_text(ElementId::QuestionType, TEACHING_BADGE);
            target.set_tone(ElementId::QuestionType, "teaching-indicator");
        }

        let options: Vec<_> = question.options.iter().cloned().collect();
        target.set_options(&options);

        state.apply_server_counters(question.score, question.progress);
        self.update_progress(state);

        self.show_screen(Screen::Quiz);
        target.set_visible(ElementId::ResultsContainer, false);
        target.set_enabled(ElementId::SubmitButton, false);
        state.selected_answer = None;
        state.awaiting_continue = false;
        target.set_selected_option(None);
    }

    /// Show the learner's pick and allow submission.
    pub fn mark_selection(&self, key: &OptionKey) {
        self.target.set_selected_option(Some(key));
        self.target.set_enabled(ElementId::SubmitButton, true);
    }

    /// Render the results overlay on top of the quiz screen.
    pub fn display_results(&self, state: &mut SessionState, result: &AnswerResult) {
        let target = &self.target;
        target.set_visible(ElementId::ResultsContainer, true);

        if result.is_correct {
            target.set_text(ElementId::ResultStatus, CORRECT_STATUS);
            target.set_tone(ElementId::ResultStatus, "correct");
            target.set_tone(ElementId::ScoreChange, "positive");
            target.set_text(ElementId::LearningProgress, CORRECT_NOTE);
            target.set_tone(ElementId::LearningProgress, "success");
        } else {
            target.set_text(ElementId::ResultStatus, INCORRECT_STATUS);
            target.set_tone(ElementId::ResultStatus, "incorrect");
            target.set_tone(ElementId::ScoreChange, "negative");
            target.set_text(ElementId::LearningProgress, MASTERY_NOTE);
            target.set_tone(ElementId::LearningProgress, "mastery");
        }
        target.set_text(ElementId::ScoreChange, &result.delta_label());

        let segments = result
            .explanation
            .as_deref()
            .map(Self::format_explanation)
            .unwrap_or_default();
        target.set_explanation(&segments);

        state.apply_server_counters(result.score, result.progress);
        if let Some(learned) = result.learned_concepts {
            state.concepts_learned = learned;
        }
        self.update_progress(state);
    }

    /// Tag two-part ❌/✅ feedback by marker; anything else stays one segment.
    #[must_use]
    pub fn format_explanation(text: &str) -> Vec<ExplanationSegment> {
        split_explanation(text)
    }

    /// Replace the quiz with the completion screen.
    pub fn show_session_complete(&self, state: &mut SessionState, result: &AnswerResult) {
        let target = &self.target;
        let final_score = result.final_score.unwrap_or(state.score);
        target.set_text(ElementId::FinalScore, &format!("Final Score: {final_score}"));

        let total = result.total_questions.unwrap_or(state.progress.completed);
        target.set_text(ElementId::TotalQuestions, &total.to_string());

        let mastered = result.learned_concepts.unwrap_or(state.concepts_learned);
        target.set_text(ElementId::ConceptsMastered, &mastered.to_string());

        if let Some(summary) = result.summary {
            target.set_text(
                ElementId::AccuracyRate,
                &format!("{}%", summary.accuracy_percent()),
            );
        }

        self.show_screen(Screen::Complete);
        state.session_complete = true;
    }

    /// Refresh the header: progress bar, position, score and concepts.
    pub fn update_progress(&self, state: &SessionState) {
        let target = &self.target;
        if let Some(percent) = state.progress.bar_percent() {
            target.set_percent(ElementId::ProgressBar, percent);
        }
        target.set_text(ElementId::ProgressText, &state.progress.label());
        target.set_text(ElementId::CurrentScore, &state.score_label());
        target.set_text(ElementId::ConceptProgress, &state.concepts_label());
    }

    pub fn set_submit_busy(&self, busy: bool) {
        self.target.set_enabled(ElementId::SubmitButton, !busy);
        let label = if busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL };
        self.target.set_text(ElementId::SubmitButton, label);
    }

    pub fn show_error(&self, message: &str) {
        self.target.notify(&format!("Error: {message}"));
    }

    /// Blank the completion fields so a later session never shows stale totals.
    pub fn clear_completion(&self) {
        for element in [
            ElementId::FinalScore,
            ElementId::TotalQuestions,
            ElementId::ConceptsMastered,
            ElementId::AccuracyRate,
        ] {
            self.target.set_text(element, "");
        }
    }

    pub fn reset_inputs(&self) {
        self.target.clear_input(ElementId::TopicInput);
        self.target.clear_input(ElementId::FileInput);
    }
}
