use std::sync::Arc;

use services::QuizBackend;

use crate::config::UiConfig;
use crate::controller::ScreenController;
use crate::orchestrator::SessionOrchestrator;
use crate::page::{PageModel, SharedPage};

pub trait UiApp: Send + Sync {
    fn backend(&self) -> Arc<dyn QuizBackend>;
    fn config(&self) -> UiConfig;
}

#[derive(Clone)]
pub struct AppContext {
    page: SharedPage,
    orchestrator: Arc<SessionOrchestrator>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let config = app.config();
        let page = SharedPage::new(PageModel::new(config.loading_steps));
        let controller = ScreenController::new(Arc::new(page.clone()));
        let orchestrator = Arc::new(SessionOrchestrator::new(app.backend(), controller, config));
        Self { page, orchestrator }
    }

    #[must_use]
    pub fn page(&self) -> SharedPage {
        self.page.clone()
    }

    #[must_use]
    pub fn orchestrator(&self) -> Arc<SessionOrchestrator> {
        Arc::clone(&self.orchestrator)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
