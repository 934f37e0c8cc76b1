mod blanks;
mod choice;

pub use blanks::{OrderGroups, ORDER_INDEPENDENT_GROUPS_KEY};

pub(crate) use blanks::matches_with_alternatives;

use serde::{Deserialize, Serialize};

use super::entity::Quiz;
use super::kind::QuizTypeKind;
use super::record::UserAnswer;

/// Result of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeOutcome {
    Correct,
    Incorrect,
    /// No automated rule applies; a human or an external reviewer decides.
    NeedsReview,
}

impl GradeOutcome {
    pub const fn is_correct(self) -> bool {
        matches!(self, GradeOutcome::Correct)
    }

    pub const fn label(self) -> &'static str {
        match self {
            GradeOutcome::Correct => "correct",
            GradeOutcome::Incorrect => "incorrect",
            GradeOutcome::NeedsReview => "needs_review",
        }
    }

    fn from_match(matched: bool) -> Self {
        if matched {
            GradeOutcome::Correct
        } else {
            GradeOutcome::Incorrect
        }
    }
}

impl Quiz {
    /// Grade a submission. Malformed submissions are wrong answers, never errors.
    pub fn grade(&self, user_answer: &UserAnswer) -> GradeOutcome {
        match self.kind {
            QuizTypeKind::SingleChoice | QuizTypeKind::MultipleChoice => {
                GradeOutcome::from_match(choice::grade_choice(
                    &self.answer,
                    &self.options,
                    self.kind.is_multiple_choice(),
                    user_answer,
                ))
            }
            QuizTypeKind::FillInTheBlank => GradeOutcome::from_match(blanks::grade_blanks(
                &user_answer.to_texts(),
                &self.answer.text().to_list(),
                &self.order_groups,
                &self.alternative_answers,
            )),
            QuizTypeKind::Subjective | QuizTypeKind::Other => GradeOutcome::NeedsReview,
        }
    }

    pub fn validate_user_answer(&self, user_answer: &UserAnswer) -> bool {
        self.grade(user_answer).is_correct()
    }
}
