use serde::{Deserialize, Serialize};

use super::error::QuizError;
use super::grading::matches_with_alternatives;

/// Answer text as authored: one value or one value per option/blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerText {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerText {
    /// Normalize into an ordered list, wrapping a scalar.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            AnswerText::Single(value) => vec![value.clone()],
            AnswerText::Multiple(values) => values.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnswerText::Single(_) => 1,
            AnswerText::Multiple(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for AnswerText {
    fn from(value: &str) -> Self {
        AnswerText::Single(value.to_string())
    }
}

impl From<String> for AnswerText {
    fn from(value: String) -> Self {
        AnswerText::Single(value)
    }
}

impl From<Vec<String>> for AnswerText {
    fn from(values: Vec<String>) -> Self {
        AnswerText::Multiple(values)
    }
}

impl From<Vec<&str>> for AnswerText {
    fn from(values: Vec<&str>) -> Self {
        AnswerText::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Canonical answer of a quiz, kept as text and (for choice quizzes) option indices.
#[derive(Debug, Clone)]
pub struct AnswerKey {
    value: AnswerText,
    indices: Vec<usize>,
}

impl AnswerKey {
    /// Resolve answer text against the option list. Texts that match no option are dropped;
    /// the key is rejected only when nothing resolves.
    pub fn from_text(text: AnswerText, options: &[String]) -> Result<Self, QuizError> {
        let texts = text.to_list();
        let indices: Vec<usize> = texts
            .iter()
            .filter_map(|candidate| options.iter().position(|option| option == candidate))
            .collect();

        if indices.is_empty() {
            return Err(QuizError::AnswerNotInOptions { answers: texts });
        }

        Ok(Self {
            value: text,
            indices,
        })
    }

    /// Build from option positions, deriving the display text from the options.
    pub fn from_indices(indices: &[i64], options: &[String]) -> Result<Self, QuizError> {
        let invalid: Vec<i64> = indices
            .iter()
            .copied()
            .filter(|index| usize::try_from(*index).map_or(true, |index| index >= options.len()))
            .collect();
        if !invalid.is_empty() {
            return Err(QuizError::IndexOutOfRange {
                indices: invalid,
                options_len: options.len(),
            });
        }

        let indices: Vec<usize> = indices.iter().map(|index| *index as usize).collect();
        let mut texts: Vec<String> = indices.iter().map(|index| options[*index].clone()).collect();
        let value = if texts.len() == 1 {
            AnswerText::Single(texts.remove(0))
        } else {
            AnswerText::Multiple(texts)
        };

        Ok(Self { value, indices })
    }

    /// Free-text answer with no option indices (fill-in-the-blank, subjective).
    pub fn from_raw_text(text: AnswerText) -> Self {
        Self {
            value: text,
            indices: Vec::new(),
        }
    }

    pub fn text(&self) -> &AnswerText {
        &self.value
    }

    pub fn indices(&self) -> Vec<usize> {
        self.indices.clone()
    }

    pub fn has_indices(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn single_index(&self) -> Option<usize> {
        match self.indices.as_slice() {
            [index] => Some(*index),
            _ => None,
        }
    }

    /// Compare option indices. Counts must agree before any element is looked at.
    pub fn matches(&self, other: &AnswerKey, order_independent: bool) -> bool {
        if self.indices.len() != other.indices.len() {
            return false;
        }

        if order_independent {
            sorted(&self.indices) == sorted(&other.indices)
        } else {
            self.indices == other.indices
        }
    }

    /// Blank-by-blank text comparison, case-insensitive, honouring alternative answers.
    pub fn matches_text(&self, user: &AnswerText, alternatives: &[String]) -> bool {
        let user = user.to_list();
        let correct = self.value.to_list();
        if user.len() != correct.len() {
            return false;
        }

        user.iter()
            .zip(correct.iter())
            .all(|(user, correct)| matches_with_alternatives(user, correct, alternatives))
    }
}

impl PartialEq for AnswerKey {
    fn eq(&self, other: &Self) -> bool {
        if self.has_indices() && other.has_indices() {
            return sorted(&self.indices) == sorted(&other.indices);
        }
        self.value == other.value
    }
}

impl Eq for AnswerKey {}

fn sorted(indices: &[usize]) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted
}
