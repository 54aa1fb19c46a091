mod quiz;

#[cfg(test)]
mod view_smoke;

pub use quiz::{PageAction, QuizPage, QuizView};
