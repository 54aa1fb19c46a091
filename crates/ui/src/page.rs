use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{AnswerOption, ExplanationSegment, OptionKey};
use tokio::sync::watch;

use crate::render::{ElementId, RenderTarget, Screen};

#[derive(Clone, Debug, PartialEq)]
pub struct ElementState {
    pub text: String,
    pub tone: String,
    pub visible: bool,
    pub enabled: bool,
    pub percent: Option<f64>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            text: String::new(),
            tone: String::new(),
            visible: true,
            enabled: true,
            percent: None,
        }
    }
}

/// In-memory page: the state of every logical element.
///
/// Views render a snapshot of it; tests assert against it directly.
#[derive(Clone, Debug, PartialEq)]
pub struct PageModel {
    elements: HashMap<ElementId, ElementState>,
    options: Vec<AnswerOption>,
    selected: Option<OptionKey>,
    explanation: Vec<ExplanationSegment>,
    loading_steps: Vec<bool>,
    inputs: HashMap<ElementId, String>,
    notifications: Vec<String>,
}

impl PageModel {
    /// Fresh page showing the start screen.
    #[must_use]
    pub fn new(loading_steps: usize) -> Self {
        let mut page = Self {
            elements: HashMap::new(),
            options: Vec::new(),
            selected: None,
            explanation: Vec::new(),
            loading_steps: vec![false; loading_steps],
            inputs: HashMap::new(),
            notifications: Vec::new(),
        };
        for screen in Screen::ALL {
            page.element_mut(screen.element()).visible = screen == Screen::Start;
        }
        page.element_mut(ElementId::ResultsContainer).visible = false;
        page.element_mut(ElementId::SubmitButton).enabled = false;
        page.element_mut(ElementId::StartFileButton).enabled = false;
        page
    }

    fn element_mut(&mut self, element: ElementId) -> &mut ElementState {
        self.elements.entry(element).or_default()
    }

    fn element(&self, element: ElementId) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    #[must_use]
    pub fn text(&self, element: ElementId) -> &str {
        self.element(element).map_or("", |state| state.text.as_str())
    }

    #[must_use]
    pub fn tone(&self, element: ElementId) -> &str {
        self.element(element).map_or("", |state| state.tone.as_str())
    }

    #[must_use]
    pub fn is_visible(&self, element: ElementId) -> bool {
        self.element(element).is_none_or(|state| state.visible)
    }

    #[must_use]
    pub fn is_enabled(&self, element: ElementId) -> bool {
        self.element(element).is_none_or(|state| state.enabled)
    }

    #[must_use]
    pub fn percent(&self, element: ElementId) -> Option<f64> {
        self.element(element).and_then(|state| state.percent)
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&OptionKey> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn explanation(&self) -> &[ExplanationSegment] {
        &self.explanation
    }

    #[must_use]
    pub fn loading_steps(&self) -> &[bool] {
        &self.loading_steps
    }

    #[must_use]
    pub fn input(&self, element: ElementId) -> &str {
        self.inputs.get(&element).map_or("", String::as_str)
    }

    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    #[must_use]
    pub fn visible_screens(&self) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|screen| self.is_visible(screen.element()))
            .collect()
    }

    /// The single visible screen, or `None` if the exclusivity invariant broke.
    #[must_use]
    pub fn active_screen(&self) -> Option<Screen> {
        match self.visible_screens().as_slice() {
            [screen] => Some(*screen),
            _ => None,
        }
    }

    pub fn set_input(&mut self, element: ElementId, value: String) {
        if element == ElementId::FileInput {
            self.element_mut(ElementId::StartFileButton).enabled = !value.trim().is_empty();
        }
        self.inputs.insert(element, value);
    }

    pub fn dismiss_notification(&mut self) -> Option<String> {
        if self.notifications.is_empty() {
            return None;
        }
        Some(self.notifications.remove(0))
    }
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A `PageModel` shared between the orchestrator and a view.
///
/// Every mutation bumps a revision on a watch channel so views can re-render.
#[derive(Clone)]
pub struct SharedPage {
    inner: Arc<Mutex<PageModel>>,
    revision: Arc<watch::Sender<u64>>,
}

impl SharedPage {
    #[must_use]
    pub fn new(model: PageModel) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(model)),
            revision: Arc::new(revision),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PageModel {
        self.lock().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn set_input(&self, element: ElementId, value: String) {
        self.update(|page| page.set_input(element, value));
    }

    pub fn dismiss_notification(&self) -> Option<String> {
        let mut dismissed = None;
        self.update(|page| dismissed = page.dismiss_notification());
        dismissed
    }

    fn lock(&self) -> MutexGuard<'_, PageModel> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut PageModel)) {
        {
            let mut page = self.lock();
            f(&mut page);
        }
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}

impl RenderTarget for SharedPage {
    fn set_text(&self, element: ElementId, text: &str) {
        self.update(|page| page.element_mut(element).text = text.to_string());
    }

    fn set_tone(&self, element: ElementId, tone: &str) {
        self.update(|page| page.element_mut(element).tone = tone.to_string());
    }

    fn set_visible(&self, element: ElementId, visible: bool) {
        self.update(|page| page.element_mut(element).visible = visible);
    }

    fn set_enabled(&self, element: ElementId, enabled: bool) {
        self.update(|page| page.element_mut(element).enabled = enabled);
    }

    fn set_percent(&self, element: ElementId, percent: f64) {
        self.update(|page| page.element_mut(element).percent = Some(percent));
    }

    fn set_options(&self, options: &[AnswerOption]) {
        self.update(|page| page.options = options.to_vec());
    }

    fn set_selected_option(&self, key: Option<&OptionKey>) {
        self.update(|page| page.selected = key.cloned());
    }

    fn set_explanation(&self, segments: &[ExplanationSegment]) {
        self.update(|page| page.explanation = segments.to_vec());
    }

    fn reset_loading_steps(&self, count: usize) {
        self.update(|page| page.loading_steps = vec![false; count]);
    }

    fn set_loading_step(&self, index: usize, active: bool) {
        self.update(|page| {
            if let Some(step) = page.loading_steps.get_mut(index) {
                *step = active;
            }
        });
    }

    fn clear_input(&self, element: ElementId) {
        self.update(|page| page.set_input(element, String::new()));
    }

    fn notify(&self, message: &str) {
        self.update(|page| page.notifications.push(message.to_string()));
    }
}
