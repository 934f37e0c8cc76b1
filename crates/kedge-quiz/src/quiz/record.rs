use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::answer::AnswerText;
use super::kind::QuizTypeKind;

/// Answer payload as it arrives from authoring tools, storage, or a quiz taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Text(String),
    Texts(Vec<String>),
    Indices(Vec<i64>),
}

/// A submitted answer has the same shape as an authored one.
pub type UserAnswer = AnswerInput;

impl AnswerInput {
    /// Normalize into one string per blank/option; numbers are rendered in decimal.
    pub fn to_texts(&self) -> Vec<String> {
        match self {
            AnswerInput::Text(value) => vec![value.clone()],
            AnswerInput::Texts(values) => values.clone(),
            AnswerInput::Indices(values) => values.iter().map(|value| value.to_string()).collect(),
        }
    }

    pub fn to_answer_text(&self) -> AnswerText {
        match self {
            AnswerInput::Text(value) => AnswerText::Single(value.clone()),
            AnswerInput::Texts(_) | AnswerInput::Indices(_) => AnswerText::Multiple(self.to_texts()),
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        match self {
            AnswerInput::Text(value) => value.is_empty(),
            AnswerInput::Texts(values) => values.is_empty(),
            AnswerInput::Indices(values) => values.is_empty(),
        }
    }
}

impl From<AnswerText> for AnswerInput {
    fn from(value: AnswerText) -> Self {
        match value {
            AnswerText::Single(value) => AnswerInput::Text(value),
            AnswerText::Multiple(values) => AnswerInput::Texts(values),
        }
    }
}

impl From<&str> for AnswerInput {
    fn from(value: &str) -> Self {
        AnswerInput::Text(value.to_string())
    }
}

impl From<Vec<&str>> for AnswerInput {
    fn from(values: Vec<&str>) -> Self {
        AnswerInput::Texts(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for AnswerInput {
    fn from(values: Vec<i64>) -> Self {
        AnswerInput::Indices(values)
    }
}

/// Flat field record shared by the persistence collaborator and quiz authoring input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub quiz_type: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerInput>,
    #[serde(default)]
    pub answer_index: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub knowledge_point_id: String,
    #[serde(default)]
    pub alternative_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_properties: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Client-facing projection. Answer fields are absent, not null, when suppressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub quiz_type: QuizTypeKind,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_index: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}
