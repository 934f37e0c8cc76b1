use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::QuizError;

/// Closed set of quiz kinds understood by the grading engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizTypeKind {
    SingleChoice,
    MultipleChoice,
    FillInTheBlank,
    Subjective,
    Other,
}

impl QuizTypeKind {
    pub const ALL: [QuizTypeKind; 5] = [
        QuizTypeKind::SingleChoice,
        QuizTypeKind::MultipleChoice,
        QuizTypeKind::FillInTheBlank,
        QuizTypeKind::Subjective,
        QuizTypeKind::Other,
    ];

    pub fn from_string(value: &str) -> Result<Self, QuizError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| QuizError::InvalidQuizType {
                value: value.to_string(),
            })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            QuizTypeKind::SingleChoice => "single-choice",
            QuizTypeKind::MultipleChoice => "multiple-choice",
            QuizTypeKind::FillInTheBlank => "fill-in-the-blank",
            QuizTypeKind::Subjective => "subjective",
            QuizTypeKind::Other => "other",
        }
    }

    pub const fn is_choice_type(self) -> bool {
        match self {
            QuizTypeKind::SingleChoice | QuizTypeKind::MultipleChoice => true,
            QuizTypeKind::FillInTheBlank | QuizTypeKind::Subjective | QuizTypeKind::Other => false,
        }
    }

    pub const fn requires_options(self) -> bool {
        self.is_choice_type()
    }

    pub const fn requires_answer_index(self) -> bool {
        self.is_choice_type()
    }

    pub const fn supports_multiple_answers(self) -> bool {
        matches!(self, QuizTypeKind::MultipleChoice)
    }

    pub const fn is_single_choice(self) -> bool {
        matches!(self, QuizTypeKind::SingleChoice)
    }

    pub const fn is_multiple_choice(self) -> bool {
        matches!(self, QuizTypeKind::MultipleChoice)
    }

    pub const fn is_fill_in_the_blank(self) -> bool {
        matches!(self, QuizTypeKind::FillInTheBlank)
    }

    pub const fn is_subjective(self) -> bool {
        matches!(self, QuizTypeKind::Subjective)
    }

    pub(crate) fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for QuizTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizTypeKind {
    type Err = QuizError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_string(value)
    }
}
