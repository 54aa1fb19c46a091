use dioxus::prelude::*;

use quiz_core::model::{AnswerOption, ExplanationSegment, OptionKey};

use crate::context::AppContext;
use crate::controller::SUBMIT_LABEL;
use crate::page::PageModel;
use crate::render::{ElementId, Screen};

const LOADING_STEP_LABELS: [&str; 4] = [
    "Analyzing your topic",
    "Mapping key concepts",
    "Writing teaching questions",
    "Preparing your session",
];

/// Everything the learner can do on the page.
#[derive(Clone, Debug, PartialEq)]
pub enum PageAction {
    TopicChanged(String),
    FileChanged(String),
    StartTopic,
    StartFile,
    SelectOption(OptionKey),
    Submit,
    Continue,
    Restart,
    DismissNotification,
}

/// Live view: renders the shared page and routes actions to the orchestrator.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let page = ctx.page();
    let orchestrator = ctx.orchestrator();
    let snapshot = use_signal({
        let page = page.clone();
        move || page.snapshot()
    });

    let page_for_watch = page.clone();
    use_future(move || {
        let page = page_for_watch.clone();
        let mut snapshot = snapshot;
        async move {
            let mut changes = page.subscribe();
            snapshot.set(page.snapshot());
            while changes.changed().await.is_ok() {
                snapshot.set(page.snapshot());
            }
        }
    });

    let dispatch = use_callback(move |action: PageAction| {
        let orchestrator = orchestrator.clone();
        match action {
            PageAction::TopicChanged(value) => page.set_input(ElementId::TopicInput, value),
            PageAction::FileChanged(value) => page.set_input(ElementId::FileInput, value),
            PageAction::StartTopic => {
                let topic = page.snapshot().input(ElementId::TopicInput).to_string();
                spawn(async move {
                    if let Err(err) = orchestrator.start_topic_session(&topic).await {
                        tracing::debug!(error = %err, "topic start did not complete");
                    }
                });
            }
            PageAction::StartFile => {
                let file_name = page.snapshot().input(ElementId::FileInput).to_string();
                spawn(async move {
                    if let Err(err) = orchestrator.start_file_session(&file_name).await {
                        tracing::debug!(error = %err, "file start did not complete");
                    }
                });
            }
            PageAction::SelectOption(key) => {
                if let Err(err) = orchestrator.select_option(key.as_str()) {
                    tracing::debug!(error = %err, "selection ignored");
                }
            }
            PageAction::Submit => {
                spawn(async move {
                    if let Err(err) = orchestrator.submit_answer().await {
                        tracing::debug!(error = %err, "submit did not complete");
                    }
                });
            }
            PageAction::Continue => {
                orchestrator.continue_to_next_question();
            }
            PageAction::Restart => orchestrator.restart_session(),
            PageAction::DismissNotification => {
                page.dismiss_notification();
            }
        }
    });

    rsx! {
        QuizPage { page: snapshot(), on_action: dispatch }
    }
}

/// Pure rendering of a page snapshot.
#[component]
pub fn QuizPage(page: PageModel, on_action: EventHandler<PageAction>) -> Element {
    let screen = page.active_screen();
    let notification = page.notifications().first().cloned();

    rsx! {
        div { class: "quiz-app",
            header { class: "quiz-app__header",
                h1 { "Progressive Quiz" }
                p { class: "quiz-app__subtitle", "Learn a topic one concept at a time." }
            }
            match screen {
                Some(Screen::Start) => rsx! { StartScreen { page: page.clone(), on_action } },
                Some(Screen::Loading) => rsx! { LoadingScreen { page: page.clone() } },
                Some(Screen::Quiz) => rsx! { QuizScreen { page: page.clone(), on_action } },
                Some(Screen::Complete) => rsx! { CompleteScreen { page: page.clone(), on_action } },
                None => rsx! {},
            }
            if let Some(message) = notification {
                div { class: "notification-backdrop",
                    div { class: "notification", role: "alertdialog",
                        p { class: "notification__message", "{message}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_action.call(PageAction::DismissNotification),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StartScreen(page: PageModel, on_action: EventHandler<PageAction>) -> Element {
    let topic = page.input(ElementId::TopicInput).to_string();
    let file_name = page.input(ElementId::FileInput).to_string();
    let file_enabled = page.is_enabled(ElementId::StartFileButton);

    rsx! {
        section { class: "screen", id: ElementId::StartScreen.as_str(),
            h2 { "What would you like to learn?" }
            div { class: "start-option",
                input {
                    id: ElementId::TopicInput.as_str(),
                    r#type: "text",
                    placeholder: "Enter a topic, e.g. Rust ownership",
                    value: "{topic}",
                    oninput: move |evt| on_action.call(PageAction::TopicChanged(evt.value())),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            on_action.call(PageAction::StartTopic);
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    id: ElementId::StartTopicButton.as_str(),
                    r#type: "button",
                    onclick: move |_| on_action.call(PageAction::StartTopic),
                    "Start Learning"
                }
            }
            div { class: "start-option start-option--file",
                input {
                    id: ElementId::FileInput.as_str(),
                    r#type: "text",
                    placeholder: "Path to a document",
                    value: "{file_name}",
                    oninput: move |evt| on_action.call(PageAction::FileChanged(evt.value())),
                }
                button {
                    class: "btn btn-secondary",
                    id: ElementId::StartFileButton.as_str(),
                    r#type: "button",
                    disabled: !file_enabled,
                    onclick: move |_| on_action.call(PageAction::StartFile),
                    "Learn from File"
                }
            }
        }
    }
}

#[component]
fn LoadingScreen(page: PageModel) -> Element {
    let message = page.text(ElementId::LoadingMessage).to_string();
    let steps = page.loading_steps().iter().enumerate().map(|(index, active)| {
        let label = LOADING_STEP_LABELS.get(index).copied().unwrap_or("Working");
        let class = if *active { "step active" } else { "step" };
        rsx! {
            li { key: "{index}", class: "{class}", "{label}" }
        }
    });

    rsx! {
        section { class: "screen", id: ElementId::LoadingScreen.as_str(),
            div { class: "spinner" }
            p { id: ElementId::LoadingMessage.as_str(), "{message}" }
            ul { class: "loading-steps", {steps} }
        }
    }
}

#[component]
fn QuizScreen(page: PageModel, on_action: EventHandler<PageAction>) -> Element {
    let percent = page.percent(ElementId::ProgressBar).unwrap_or(0.0);
    let progress_text = page.text(ElementId::ProgressText).to_string();
    let score = page.text(ElementId::CurrentScore).to_string();
    let concepts = page.text(ElementId::ConceptProgress).to_string();
    let question = page.text(ElementId::QuestionText).to_string();
    let difficulty = page.text(ElementId::QuestionDifficulty).to_string();
    let difficulty_tone = page.tone(ElementId::QuestionDifficulty).to_string();
    let concept = page.text(ElementId::QuestionConcept).to_string();
    let badge = page.text(ElementId::QuestionType).to_string();
    let badge_tone = page.tone(ElementId::QuestionType).to_string();
    let results_visible = page.is_visible(ElementId::ResultsContainer);
    let submit_enabled = page.is_enabled(ElementId::SubmitButton);
    let submit_label = match page.text(ElementId::SubmitButton) {
        "" => SUBMIT_LABEL.to_string(),
        label => label.to_string(),
    };
    let selected = page.selected_option().cloned();

    let options = page.options().iter().map(|option| {
        let is_selected = selected.as_ref() == Some(&option.key);
        rsx! {
            OptionRow {
                key: "{option.key}",
                option: option.clone(),
                selected: is_selected,
                locked: results_visible,
                on_action,
            }
        }
    });

    rsx! {
        section { class: "screen", id: ElementId::QuizScreen.as_str(),
            div { class: "quiz-status",
                div { class: "progress",
                    div {
                        class: "progress__bar",
                        id: ElementId::ProgressBar.as_str(),
                        style: "width: {percent}%",
                    }
                }
                span { id: ElementId::ProgressText.as_str(), "{progress_text}" }
                span { id: ElementId::CurrentScore.as_str(), "{score}" }
                span { id: ElementId::ConceptProgress.as_str(), "{concepts}" }
            }
            div { class: "question-meta",
                span { class: "difficulty {difficulty_tone}", id: ElementId::QuestionDifficulty.as_str(), "{difficulty}" }
                span { class: "concept", id: ElementId::QuestionConcept.as_str(), "{concept}" }
                span { class: "{badge_tone}", id: ElementId::QuestionType.as_str(), "{badge}" }
            }
            h3 { class: "question-text", id: ElementId::QuestionText.as_str(), "{question}" }
            div { class: "options", id: ElementId::OptionsContainer.as_str(), {options} }
            if results_visible {
                ResultsPanel { page: page.clone(), on_action }
            } else {
                button {
                    class: "btn btn-primary",
                    id: ElementId::SubmitButton.as_str(),
                    r#type: "button",
                    disabled: !submit_enabled,
                    onclick: move |_| on_action.call(PageAction::Submit),
                    "{submit_label}"
                }
            }
        }
    }
}

#[component]
fn OptionRow(
    option: AnswerOption,
    selected: bool,
    locked: bool,
    on_action: EventHandler<PageAction>,
) -> Element {
    let class = if selected { "option selected" } else { "option" };
    let key = option.key.clone();

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            "data-option": "{option.key}",
            disabled: locked,
            onclick: move |_| on_action.call(PageAction::SelectOption(key.clone())),
            span { class: "option__key", "{option.key}." }
            span { class: "option__text", "{option.text}" }
        }
    }
}

#[component]
fn ResultsPanel(page: PageModel, on_action: EventHandler<PageAction>) -> Element {
    let status = page.text(ElementId::ResultStatus).to_string();
    let status_tone = page.tone(ElementId::ResultStatus).to_string();
    let delta = page.text(ElementId::ScoreChange).to_string();
    let delta_tone = page.tone(ElementId::ScoreChange).to_string();
    let note = page.text(ElementId::LearningProgress).to_string();
    let note_tone = page.tone(ElementId::LearningProgress).to_string();
    let segments = page.explanation().iter().enumerate().map(|(index, segment)| {
        rsx! { ExplanationBlock { key: "{index}", segment: segment.clone() } }
    });

    rsx! {
        div { class: "results", id: ElementId::ResultsContainer.as_str(),
            div { class: "results__header",
                span { class: "result-status {status_tone}", id: ElementId::ResultStatus.as_str(), "{status}" }
                span { class: "score-change {delta_tone}", id: ElementId::ScoreChange.as_str(), "{delta}" }
            }
            div { class: "explanation", id: ElementId::ExplanationContent.as_str(), {segments} }
            p { class: "learning-note {note_tone}", id: ElementId::LearningProgress.as_str(), "{note}" }
            button {
                class: "btn btn-primary",
                id: ElementId::NextButton.as_str(),
                r#type: "button",
                onclick: move |_| on_action.call(PageAction::Continue),
                "Continue"
            }
        }
    }
}

#[component]
fn ExplanationBlock(segment: ExplanationSegment) -> Element {
    let tone = segment.kind.tone();
    rsx! {
        p { class: "{tone}", "{segment.text}" }
    }
}

#[component]
fn CompleteScreen(page: PageModel, on_action: EventHandler<PageAction>) -> Element {
    let final_score = page.text(ElementId::FinalScore).to_string();
    let total = page.text(ElementId::TotalQuestions).to_string();
    let mastered = page.text(ElementId::ConceptsMastered).to_string();
    let accuracy = page.text(ElementId::AccuracyRate).to_string();

    rsx! {
        section { class: "screen", id: ElementId::CompleteScreen.as_str(),
            h2 { "Session complete" }
            p { class: "final-score", id: ElementId::FinalScore.as_str(), "{final_score}" }
            dl { class: "complete-stats",
                dt { "Questions answered" }
                dd { id: ElementId::TotalQuestions.as_str(), "{total}" }
                dt { "Concepts mastered" }
                dd { id: ElementId::ConceptsMastered.as_str(), "{mastered}" }
                if !accuracy.is_empty() {
                    dt { "Accuracy" }
                    dd { id: ElementId::AccuracyRate.as_str(), "{accuracy}" }
                }
            }
            button {
                class: "btn btn-primary",
                id: ElementId::RestartButton.as_str(),
                r#type: "button",
                onclick: move |_| on_action.call(PageAction::Restart),
                "Start a new topic"
            }
        }
    }
}
