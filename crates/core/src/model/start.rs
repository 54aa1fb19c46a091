use serde::Serialize;

use crate::error::ModelError;

/// How a new session is seeded. Serialises as `{"type": ..., ...fields}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StartMode {
    Topic { topic: String },
    File { file_name: String },
}

impl StartMode {
    /// Build a topic start from raw user input.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyTopic` when the trimmed input is empty.
    pub fn topic(input: &str) -> Result<Self, ModelError> {
        let topic = input.trim();
        if topic.is_empty() {
            return Err(ModelError::EmptyTopic);
        }
        Ok(Self::Topic {
            topic: topic.to_string(),
        })
    }

    /// Build a file start from the picked file's name.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyFileName` when no file was picked.
    pub fn file(file_name: &str) -> Result<Self, ModelError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(ModelError::EmptyFileName);
        }
        Ok(Self::File {
            file_name: file_name.to_string(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            StartMode::Topic { .. } => "topic",
            StartMode::File { .. } => "file",
        }
    }
}
