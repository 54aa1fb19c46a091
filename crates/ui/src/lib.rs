pub mod app;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod page;
pub mod render;
pub mod views;

pub use app::App;
pub use config::UiConfig;
pub use context::{AppContext, UiApp, build_app_context};
pub use controller::ScreenController;
pub use error::QuizError;
pub use orchestrator::SessionOrchestrator;
pub use page::{PageModel, SharedPage};
pub use render::{ElementId, RenderTarget, Screen};
