mod answer;
mod explanation;
mod ids;
mod progress;
mod question;
mod report;
mod session;
mod start;

pub use answer::{AnswerResult, AnswerSummary, CORRECT_DELTA, INCORRECT_DELTA};
pub use explanation::{
    CORRECT_MARKER, ExplanationSegment, SegmentKind, WRONG_MARKER, split_explanation,
};
pub use ids::{OptionKey, SessionId};
pub use progress::ProgressSnapshot;
pub use question::{AnswerOption, QuestionOptions, QuestionPayload};
pub use report::{HealthStatus, ProgressReport};
pub use session::{INITIAL_SCORE, SessionState};
pub use start::StartMode;
