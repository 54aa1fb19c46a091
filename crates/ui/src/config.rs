use std::env;
use std::time::Duration;

pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_secs(3);
pub const DEFAULT_LOADING_STEP_INTERVAL: Duration = Duration::from_millis(1500);
pub const DEFAULT_LOADING_STEPS: usize = 4;

/// Timing knobs for screen transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// How long results stay up before the completion screen replaces them.
    pub completion_delay: Duration,
    pub loading_step_interval: Duration,
    pub loading_steps: usize,
}

impl UiConfig {
    /// Defaults overridden by `QUIZ_COMPLETION_DELAY_MS` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let completion_delay = env::var("QUIZ_COMPLETION_DELAY_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(DEFAULT_COMPLETION_DELAY, Duration::from_millis);
        Self {
            completion_delay,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            completion_delay: DEFAULT_COMPLETION_DELAY,
            loading_step_interval: DEFAULT_LOADING_STEP_INTERVAL,
            loading_steps: DEFAULT_LOADING_STEPS,
        }
    }
}
