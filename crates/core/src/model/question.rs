use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{OptionKey, ProgressSnapshot, SessionId};

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub key: OptionKey,
    pub text: String,
}

/// Answer options in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionOptions(Vec<AnswerOption>);

impl QuestionOptions {
    #[must_use]
    pub fn new(options: Vec<AnswerOption>) -> Self {
        Self(options)
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, AnswerOption> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &OptionKey) -> bool {
        self.0.iter().any(|option| &option.key == key)
    }

    #[must_use]
    pub fn get(&self, key: &OptionKey) -> Option<&str> {
        self.0
            .iter()
            .find(|option| &option.key == key)
            .map(|option| option.text.as_str())
    }
}

impl<'a> IntoIterator for &'a QuestionOptions {
    type Item = &'a AnswerOption;
    type IntoIter = std::slice::Iter<'a, AnswerOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for QuestionOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for option in &self.0 {
            map.serialize_entry(option.key.as_str(), &option.text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QuestionOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = QuestionOptions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option keys to option text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut options = Vec::with_capacity(access.size_hint().unwrap_or(4));
                while let Some((key, text)) = access.next_entry::<String, String>()? {
                    let key = OptionKey::new(key).map_err(de::Error::custom)?;
                    options.push(AnswerOption { key, text });
                }
                Ok(QuestionOptions(options))
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

/// A question as delivered by the backend.
///
/// Fields the client does not interpret (correct answer, explanations,
/// concept ids, ...) are kept in `extra` so the payload can be echoed back
/// verbatim when the answer is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    #[serde(
        default,
        deserialize_with = "blank_session_id_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<SessionId>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaching_focus: Option<String>,
    #[serde(default)]
    pub is_mastery_question: bool,
    #[serde(default)]
    pub options: QuestionOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A blank `session_id` on a question means the server issued none.
fn blank_session_id_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SessionId>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| SessionId::new(value).ok()))
}

impl QuestionPayload {
    pub const DEFAULT_DIFFICULTY: &'static str = "Medium";
    pub const DEFAULT_CONCEPT: &'static str = "Learning Concept";

    /// Difficulty badge text, `Medium` when the server did not say.
    #[must_use]
    pub fn difficulty_label(&self) -> &str {
        self.difficulty
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(Self::DEFAULT_DIFFICULTY)
    }

    /// Lower-cased difficulty used as a styling tone, e.g. `easy`.
    #[must_use]
    pub fn difficulty_tone(&self) -> String {
        self.difficulty_label().to_lowercase()
    }

    #[must_use]
    pub fn concept_label(&self) -> String {
        let focus = self
            .teaching_focus
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(Self::DEFAULT_CONCEPT);
        format!("Concept: {focus}")
    }
}
